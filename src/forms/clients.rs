//! Forms for creating, editing and bulk-importing clients.

use std::collections::HashSet;
use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, PersonName, PhoneNumber, non_blank};
use crate::domain::user::{NewUser, UpdateUser};
use crate::forms::FormError;

/// Form data shared by the add and save client actions.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub company: Option<String>,
}

/// Validated client fields.
pub struct ClientPayload {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = PersonName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = Email::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            name,
            email,
            phone,
            company: non_blank(form.company),
        })
    }
}

impl ClientPayload {
    pub fn into_new_user(self) -> NewUser {
        NewUser::client(self.name, self.email, self.phone, self.company)
    }

    pub fn into_update(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
        }
    }
}

#[derive(MultipartForm)]
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadClientsForm {
    /// Reads the uploaded file and parses it with [`parse_clients_csv`].
    pub fn parse(&mut self) -> Result<Vec<NewUser>, FormError> {
        let mut content = String::new();
        self.csv
            .file
            .read_to_string(&mut content)
            .map_err(|err| FormError::InvalidCsv(err.to_string()))?;
        parse_clients_csv(&content)
    }
}

/// Parses a `name,email,phone,company` CSV into new client accounts.
///
/// Unknown columns are ignored, `phone` and `company` are optional. Emails are
/// de-duplicated within the file, keeping the first row.
pub fn parse_clients_csv(content: &str) -> Result<Vec<NewUser>, FormError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| FormError::InvalidCsv(err.to_string()))?
        .iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let name_idx = column("name").ok_or_else(|| FormError::InvalidCsv("missing name column".into()))?;
    let email_idx =
        column("email").ok_or_else(|| FormError::InvalidCsv("missing email column".into()))?;
    let phone_idx = column("phone");
    let company_idx = column("company");

    let mut clients: Vec<NewUser> = Vec::new();
    let mut seen: HashSet<Email> = HashSet::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|err| FormError::InvalidCsv(err.to_string()))?;
        let row = line + 2;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);

        let name = PersonName::new(field(Some(name_idx)).unwrap_or_default())
            .map_err(|_| FormError::InvalidCsv(format!("row {row}: invalid name")))?;
        let email = Email::new(field(Some(email_idx)).unwrap_or_default())
            .map_err(|_| FormError::InvalidCsv(format!("row {row}: invalid email")))?;
        let phone = non_blank(field(phone_idx))
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidCsv(format!("row {row}: invalid phone")))?;

        if !seen.insert(email.clone()) {
            continue;
        }
        clients.push(NewUser::client(name, email, phone, field(company_idx)));
    }

    Ok(clients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_ignores_unknown_columns() {
        let csv = "name,email,notes,company\n\
                   Alice,ALICE@example.com,vip,Acme\n\
                   Bob,bob@example.com,,\n";
        let clients = parse_clients_csv(csv).unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].email.as_str(), "alice@example.com");
        assert_eq!(clients[0].company.as_deref(), Some("Acme"));
        assert_eq!(clients[1].company, None);
        assert!(clients[1].phone.is_none());
    }

    #[test]
    fn duplicate_emails_keep_first_row() {
        let csv = "name,email\nAlice,a@example.com\nAlice Again,A@example.com\n";
        let clients = parse_clients_csv(csv).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name.as_str(), "Alice");
    }

    #[test]
    fn large_uploads_keep_one_row_per_email() {
        let mut csv = String::from("name,email\n");
        for i in 0..5_000 {
            csv.push_str(&format!("Client {i},client{}@example.com\n", i % 2_500));
        }
        let clients = parse_clients_csv(&csv).unwrap();

        assert_eq!(clients.len(), 2_500);
        assert_eq!(clients[0].name.as_str(), "Client 0");
        assert_eq!(clients[2_499].email.as_str(), "client2499@example.com");
    }

    #[test]
    fn missing_email_column_is_an_error() {
        assert!(matches!(
            parse_clients_csv("name,phone\nAlice,\n"),
            Err(FormError::InvalidCsv(_))
        ));
    }

    #[test]
    fn bad_email_reports_row() {
        match parse_clients_csv("name,email\nAlice,a@example.com\nBob,nope\n") {
            Err(FormError::InvalidCsv(message)) => assert!(message.contains("row 3")),
            _ => panic!("expected csv error"),
        }
    }

    #[test]
    fn form_validation_rejects_bad_email() {
        let form = ClientForm {
            name: "Alice".into(),
            email: "not-an-email".into(),
            phone: None,
            company: None,
        };
        assert!(ClientPayload::try_from(form).is_err());
    }
}
