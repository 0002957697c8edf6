pub mod repository;
pub mod service;

pub use repository::StudentRepository;
pub use service::StudentService;
