//! Forms for catalog services and packages.

use serde::Deserialize;
use validator::Validate;

use crate::domain::catalog::{PackageData, ServiceData};
use crate::domain::status::BillingPeriod;
use crate::domain::types::{CatalogName, ServiceId, non_blank};
use crate::forms::{FormError, parse_currency, parse_money};

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
    #[serde(default)]
    pub currency: Option<String>,
}

impl TryFrom<ServiceForm> for ServiceData {
    type Error = FormError;

    fn try_from(form: ServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: CatalogName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            price_cents: parse_money(&form.price)?,
            currency: parse_currency(form.currency)?,
        })
    }
}

/// Package form; `service_ids` is a repeated field and is therefore decoded
/// with `serde_html_form` rather than `web::Form`.
#[derive(Debug, Deserialize, Validate)]
pub struct PackageForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub billing_period: String,
    #[serde(default)]
    pub service_ids: Vec<i32>,
}

impl PackageForm {
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

impl TryFrom<PackageForm> for PackageData {
    type Error = FormError;

    fn try_from(form: PackageForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let billing_period: BillingPeriod = form
            .billing_period
            .parse()
            .map_err(|_| FormError::InvalidStatus)?;

        let mut service_ids = form
            .service_ids
            .into_iter()
            .map(|id| ServiceId::new(id).map_err(|_| FormError::InvalidId))
            .collect::<Result<Vec<_>, _>>()?;
        service_ids.sort_unstable();
        service_ids.dedup();

        Ok(Self {
            name: CatalogName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            price_cents: parse_money(&form.price)?,
            currency: parse_currency(form.currency)?,
            billing_period,
            service_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_form_reads_repeated_services() {
        let body = b"name=Starter&price=99.00&billing_period=MONTHLY&service_ids=3&service_ids=1&service_ids=3";
        let form = PackageForm::from_bytes(body).unwrap();
        let data = PackageData::try_from(form).unwrap();

        assert_eq!(data.billing_period, BillingPeriod::Monthly);
        assert_eq!(
            data.service_ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(data.price_cents, 9_900);
    }

    #[test]
    fn package_without_services_is_allowed() {
        let form = PackageForm::from_bytes(b"name=Audit&price=500&billing_period=ONE_TIME").unwrap();
        let data = PackageData::try_from(form).unwrap();
        assert!(data.service_ids.is_empty());
    }

    #[test]
    fn undecodable_fields_report_the_decode_error() {
        let missing_price = PackageForm::from_bytes(b"name=Starter&billing_period=MONTHLY");
        match missing_price {
            Err(FormError::Malformed(message)) => assert!(message.contains("price")),
            other => panic!("unexpected result: {other:?}"),
        }

        let bad_service =
            PackageForm::from_bytes(b"name=Starter&price=1&billing_period=MONTHLY&service_ids=abc");
        assert!(matches!(bad_service, Err(FormError::Malformed(_))));
    }

    #[test]
    fn unknown_billing_period_is_rejected() {
        let form = PackageForm::from_bytes(b"name=X&price=1&billing_period=WEEKLY").unwrap();
        assert!(matches!(
            PackageData::try_from(form),
            Err(FormError::InvalidStatus)
        ));
    }

    #[test]
    fn service_form_converts() {
        let data = ServiceData::try_from(ServiceForm {
            name: "SEO audit".into(),
            description: Some(" ".into()),
            price: "1,200".into(),
            currency: Some("usd".into()),
        })
        .unwrap();
        assert_eq!(data.price_cents, 120_000);
        assert_eq!(data.description, None);
    }
}
