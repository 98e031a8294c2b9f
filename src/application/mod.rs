// Application layer - Use cases and collaborator interfaces
pub mod catalog_repository;
pub mod quote_repository;
pub mod quote_session;
