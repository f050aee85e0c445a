//! Spanish address reference data used by registration forms.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpainProvince {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpainTown {
    pub id: i32,
    pub name: String,
    pub province_id: i32,
}

/// Street type such as "Calle" or "Avenida".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressType {
    pub id: i32,
    pub name: String,
}

/// Everything a registration form needs in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressData {
    pub provinces: Vec<SpainProvince>,
    pub towns: Vec<SpainTown>,
    pub address_types: Vec<AddressType>,
}
