//! Table body markup.

use super::view::{RenderedRow, RenderedTable};

/// `data-cluster` value marking the non-data control cell.
pub const CONTROL_CLUSTER: &str = "align:center justify:between";

impl RenderedTable {
    /// Returns the `<tbody>` inner markup for every rendered row.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (index, row) in self.rows().iter().enumerate() {
            write_row(&mut out, index, row);
        }
        out
    }
}

fn write_row(out: &mut String, index: usize, row: &RenderedRow) {
    let id = row.id();
    out.push_str(&format!("<tr data-row-id=\"{id}\">\n"));
    for cell in row.cells() {
        let editable = if cell.key().is_editable() {
            " contenteditable=\"true\""
        } else {
            ""
        };
        out.push_str(&format!(
            "  <td{editable} data-key=\"{}\">{}</td>\n",
            cell.key(),
            escape_html(cell.text())
        ));
    }
    out.push_str(&format!("  <td data-cluster=\"{CONTROL_CLUSTER}\">\n"));
    out.push_str("    <button class=\"save\" data-action=\"save\">Save</button>\n");
    out.push_str(&format!(
        "    <button class=\"delete\" data-action=\"delete\" data-row-id=\"{id}\" data-index=\"{index}\">Delete</button>\n"
    ));
    out.push_str("  </td>\n");
    out.push_str("</tr>\n");
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;
    use crate::model::row::Row;
    use crate::render::render_table;
    use uuid::Uuid;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn row_markup_marks_date_read_only_and_carries_controls() {
        let id = Uuid::nil();
        let mut row = Row::with_id(id, "d1");
        row.title = "A".to_string();
        let html = render_table(&[row]).to_html();

        assert!(html.contains("<td contenteditable=\"true\" data-key=\"title\">A</td>"));
        assert!(html.contains("<td data-key=\"date\">d1</td>"));
        assert!(html.contains("data-action=\"save\""));
        assert!(html.contains(&format!(
            "data-action=\"delete\" data-row-id=\"{id}\" data-index=\"0\""
        )));
        assert_eq!(html.matches("<tr ").count(), 1);
    }

    #[test]
    fn row_markup_is_complete() {
        let id = Uuid::nil();
        let html = render_table(&[Row::with_id(id, "d1")]).to_html();
        let expected = format!(
            "<tr data-row-id=\"{id}\">\n\
             \x20 <td contenteditable=\"true\" data-key=\"title\"></td>\n\
             \x20 <td data-key=\"date\">d1</td>\n\
             \x20 <td contenteditable=\"true\" data-key=\"description\"></td>\n\
             \x20 <td contenteditable=\"true\" data-key=\"tags\"></td>\n\
             \x20 <td contenteditable=\"true\" data-key=\"value\"></td>\n\
             \x20 <td data-cluster=\"align:center justify:between\">\n\
             \x20   <button class=\"save\" data-action=\"save\">Save</button>\n\
             \x20   <button class=\"delete\" data-action=\"delete\" data-row-id=\"{id}\" data-index=\"0\">Delete</button>\n\
             \x20 </td>\n\
             </tr>\n"
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn empty_table_renders_no_markup() {
        assert!(render_table(&[]).to_html().is_empty());
    }
}
