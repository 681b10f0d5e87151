pub mod extensions;
pub mod general_name;
pub mod policy;
pub mod name;
pub mod attribute;
pub mod algorithm_identifier;
pub mod alg_id_dsa;
pub mod x509_key;
pub mod unique_identity;
pub mod revocation_reason;
pub mod cidr_netmask;

pub use extensions::*;
pub use general_name::*;
pub use policy::*;
pub use name::*;
pub use attribute::*;
pub use algorithm_identifier::*;
pub use alg_id_dsa::*;
pub use x509_key::*;
pub use unique_identity::*;
pub use revocation_reason::*;
pub use cidr_netmask::*;
