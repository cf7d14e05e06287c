//! Taxonomy-term tables. Subtypes are taxonomy names ("category",
//! "post_tag", custom taxonomies); registering against several
//! taxonomies resolves one handler per taxonomy.

use crate::host::AdminHost;
use crate::model::ObjectId;

pub const OBJECT_TYPE: &str = "term";

pub(crate) const ID_SORT_FIELD: &str = "term_id";

pub(crate) fn fetch_value<H: AdminHost>(host: &H, id: ObjectId, key: &str) -> Option<String> {
    host.term_meta(id, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn test_fetch_reads_term_channel() {
        let mut host = MemoryHost::new();
        host.set_term_meta(3, "color", "#336699");

        assert_eq!(fetch_value(&host, 3, "color").as_deref(), Some("#336699"));
        assert_eq!(fetch_value(&host, 3, "icon"), None);
    }
}
