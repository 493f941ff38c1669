//! Plain text template - one line per entry

use tinytemplate::TinyTemplate;

use super::{Index, Template};

static TEMPLATE: &str = "{{ for entry in entries }}{entry.name}  {entry.references}
{{ endfor }}";

/// Template for a plain text index, each entry followed by its occurrences
pub struct Plain;

impl Template for Plain {
    fn render(&self, index: &Index) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("plain", TEMPLATE)?;

        tt.render("plain", index)
    }
}
