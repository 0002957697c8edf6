pub mod repository;
pub mod service;

pub use repository::CompanyRepository;
pub use service::CompanyService;
