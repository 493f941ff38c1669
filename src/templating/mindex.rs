//! Tab-separated template - the import format, so an index can be moved
//! between catalogs

use tinytemplate::TinyTemplate;

use super::{Index, Template};

static TEMPLATE: &str = "{{ for entry in entries }}{{ if entry.uof }}{entry.name}\t{entry.uof}\t{entry.sort_key}
{{ endif }}{{ endfor }}";

/// Template writing one line per entry with occurrences: the name, every
/// occurrence as a single UOF string, and the sort key. Entries without
/// occurrences are left out.
pub struct Mindex;

impl Template for Mindex {
    fn render(&self, index: &Index) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("mindex", TEMPLATE)?;

        tt.render("mindex", index)
    }
}
