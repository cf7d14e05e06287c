//! Media-library tables. Media rows are content objects of the fixed
//! "attachment" type on the host side, so values travel over the post
//! channel and the table has no further subtypes.

use crate::host::AdminHost;
use crate::model::ObjectId;

pub const OBJECT_TYPE: &str = "attachment";

pub(crate) const ID_SORT_FIELD: &str = "id";

pub(crate) fn fetch_value<H: AdminHost>(host: &H, id: ObjectId, key: &str) -> Option<String> {
    host.post_meta(id, key)
}
