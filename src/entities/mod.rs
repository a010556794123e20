//! Typed rows for the tables owned by the hosted catalog store
//!
//! These structs mirror the store's relational schema. The toolkit never
//! owns this data; it holds transient copies between a read and a write.

pub mod article;
pub mod category;
pub mod contractor;
pub mod domain;
pub mod manufacturer;
pub mod project;

pub use article::{Article, ArticleManufacturer};
pub use category::Category;
pub use contractor::{Contractor, ContractorAgreement};
pub use domain::{Domain, Subdomain};
pub use manufacturer::Manufacturer;
pub use project::{Project, ProjectEquipment, ProjectStatus, ProjectType};
