use chrono::NaiveTime;
use dinery_data::RestaurantRecord;
use tracing::{debug, instrument};

use super::ListingError;
use crate::classify::classify_price;
use crate::session::{Role, Session};

const STATUS_OPEN: i64 = 1;

fn parse_hhmm(value: &str) -> Result<NaiveTime, ListingError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ListingError::InvalidTimeFormat(value.to_string()))
}

/// Both times must be `HH:MM` and opening must come strictly before closing.
pub fn validate_hours(opentime: &str, closetime: &str) -> Result<(), ListingError> {
    let open = parse_hhmm(opentime)?;
    let close = parse_hhmm(closetime)?;
    if open >= close {
        return Err(ListingError::OpenNotBeforeClose {
            open: opentime.to_string(),
            close: closetime.to_string(),
        });
    }
    Ok(())
}

fn price_label(menu: &str) -> String {
    classify_price(menu).as_str().to_string()
}

/// Owners may edit their own listings; admins may edit any.
pub fn authorize_edit(record: &RestaurantRecord, session: &Session) -> Result<(), ListingError> {
    if session.role == Role::Admin || record.owner == Some(session.user_id) {
        Ok(())
    } else {
        Err(ListingError::NotOwner {
            id: record.id,
            user_id: session.user_id,
        })
    }
}

/// A new listing as submitted by an owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub address: String,
    pub zip: Option<u32>,
    pub description: String,
    pub opentime: String,
    pub closetime: String,
    /// Raw menu payload.
    pub menu: String,
    pub phone: Option<u64>,
}

impl ListingDraft {
    pub fn validate(&self, existing: &[RestaurantRecord]) -> Result<(), ListingError> {
        validate_hours(&self.opentime, &self.closetime)?;
        if existing
            .iter()
            .any(|r| r.name == self.name && r.address == self.address)
        {
            return Err(ListingError::DuplicateListing {
                name: self.name.clone(),
                address: self.address.clone(),
            });
        }
        Ok(())
    }

    /// Validate and turn the draft into a stored record. New listings start
    /// unrated and listed open.
    #[instrument(skip(self, existing), fields(name = %self.name))]
    pub fn into_record(
        self,
        id: u32,
        owner: u64,
        existing: &[RestaurantRecord],
    ) -> Result<RestaurantRecord, ListingError> {
        self.validate(existing)?;
        let price_label = price_label(&self.menu);
        debug!(id, price = %price_label, "Creating listing");
        Ok(RestaurantRecord {
            id,
            name: self.name,
            address: self.address,
            zip: self.zip,
            description: self.description,
            opentime: self.opentime,
            closetime: self.closetime,
            status: STATUS_OPEN,
            rating: 0.0,
            menu: self.menu,
            owner: Some(owner),
            phone: self.phone,
            price_label: Some(price_label),
        })
    }
}

/// Partial edit of an existing listing. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<u32>,
    pub description: Option<String>,
    pub opentime: Option<String>,
    pub closetime: Option<String>,
    pub status: Option<i64>,
    /// `Some(None)` clears the menu.
    pub menu: Option<Option<String>>,
    pub phone: Option<u64>,
}

impl ListingUpdate {
    /// Apply the edit. Nothing is changed when validation fails.
    #[instrument(skip_all, fields(id = record.id))]
    pub fn apply(self, record: &mut RestaurantRecord) -> Result<(), ListingError> {
        if self.opentime.is_some() || self.closetime.is_some() {
            validate_hours(
                self.opentime.as_deref().unwrap_or(&record.opentime),
                self.closetime.as_deref().unwrap_or(&record.closetime),
            )?;
        }

        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(address) = self.address {
            record.address = address;
        }
        if let Some(zip) = self.zip {
            record.zip = Some(zip);
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(opentime) = self.opentime {
            record.opentime = opentime;
        }
        if let Some(closetime) = self.closetime {
            record.closetime = closetime;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(phone) = self.phone {
            record.phone = Some(phone);
        }
        if let Some(menu) = self.menu {
            record.menu = menu.unwrap_or_default();
            let label = price_label(&record.menu);
            debug!(price = %label, "Menu changed, repriced");
            record.price_label = Some(label);
        }
        Ok(())
    }
}
