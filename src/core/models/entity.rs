//! Tenant entities: hostels and corporate offices

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hostel mess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostel {
    /// Unique identifier
    pub id: Uuid,
    /// Hostel name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact email
    pub contact_email: String,
    /// Contact phone
    pub contact_phone: String,
    /// Bed capacity
    pub capacity: i32,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Hostel {
    /// Create a new hostel
    pub fn new(
        name: String,
        address: String,
        contact_email: String,
        contact_phone: String,
        capacity: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            address,
            contact_email,
            contact_phone,
            capacity,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Partial update for a hostel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostelUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub capacity: Option<i32>,
}

impl HostelUpdate {
    /// Apply this patch to an existing hostel
    pub fn apply(self, hostel: &mut Hostel) {
        if let Some(name) = self.name {
            hostel.name = name;
        }
        if let Some(address) = self.address {
            hostel.address = address;
        }
        if let Some(contact_email) = self.contact_email {
            hostel.contact_email = contact_email;
        }
        if let Some(contact_phone) = self.contact_phone {
            hostel.contact_phone = contact_phone;
        }
        if let Some(capacity) = self.capacity {
            hostel.capacity = capacity;
        }
    }
}

/// A corporate office mess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateOffice {
    /// Unique identifier
    pub id: Uuid,
    /// Office name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact email
    pub contact_email: String,
    /// Contact phone
    pub contact_phone: String,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl CorporateOffice {
    /// Create a new corporate office
    pub fn new(name: String, address: String, contact_email: String, contact_phone: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            address,
            contact_email,
            contact_phone,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Partial update for a corporate office
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorporateOfficeUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl CorporateOfficeUpdate {
    /// Apply this patch to an existing office
    pub fn apply(self, office: &mut CorporateOffice) {
        if let Some(name) = self.name {
            office.name = name;
        }
        if let Some(address) = self.address {
            office.address = address;
        }
        if let Some(contact_email) = self.contact_email {
            office.contact_email = contact_email;
        }
        if let Some(contact_phone) = self.contact_phone {
            office.contact_phone = contact_phone;
        }
    }
}
