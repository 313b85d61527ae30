pub mod reference_date;

pub use reference_date::resolve_reference_date;
