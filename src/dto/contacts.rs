use serde::Serialize;

use crate::domain::contact::Contact;
use crate::domain::status::StatusOption;
use crate::dto::{Badged, StatusFilter};
use crate::pagination::Paginated;

#[derive(Debug, Serialize)]
pub struct ContactsPageData {
    pub contacts: Paginated<Badged<Contact>>,
    pub filter: StatusFilter,
}

#[derive(Debug, Serialize)]
pub struct ContactPageData {
    pub contact: Badged<Contact>,
    pub status_options: Vec<StatusOption>,
}
