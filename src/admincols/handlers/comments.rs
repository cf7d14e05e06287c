//! Comment tables. No subtypes.

use crate::host::AdminHost;
use crate::model::ObjectId;

pub const OBJECT_TYPE: &str = "comment";

pub(crate) const ID_SORT_FIELD: &str = "comment_id";

pub(crate) fn fetch_value<H: AdminHost>(host: &H, id: ObjectId, key: &str) -> Option<String> {
    host.comment_meta(id, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn test_fetch_reads_comment_channel() {
        let mut host = MemoryHost::new();
        host.set_comment_meta(9, "rating", "4");

        assert_eq!(fetch_value(&host, 9, "rating").as_deref(), Some("4"));
    }
}
