//! Content-item tables. Subtypes are the host's content types ("post",
//! "page", custom types), so one handler exists per content type and
//! they all share this channel.

use crate::host::AdminHost;
use crate::model::ObjectId;

pub const OBJECT_TYPE: &str = "post";

/// Query field for the object-identifier sort fallback.
pub(crate) const ID_SORT_FIELD: &str = "id";

pub(crate) fn fetch_value<H: AdminHost>(host: &H, id: ObjectId, key: &str) -> Option<String> {
    host.post_meta(id, key)
}
