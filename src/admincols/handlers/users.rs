//! User tables. No subtypes: the one user table registers against the
//! object type itself.

use crate::host::AdminHost;
use crate::model::ObjectId;

pub const OBJECT_TYPE: &str = "user";

pub(crate) const ID_SORT_FIELD: &str = "user_id";

pub(crate) fn fetch_value<H: AdminHost>(host: &H, id: ObjectId, key: &str) -> Option<String> {
    host.user_meta(id, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn test_fetch_reads_user_channel() {
        let mut host = MemoryHost::new();
        host.set_user_meta(5, "last_login", "2024-10-02");
        host.set_post_meta(5, "last_login", "wrong channel");

        assert_eq!(
            fetch_value(&host, 5, "last_login").as_deref(),
            Some("2024-10-02")
        );
    }
}
