pub mod assets;
pub mod dashboard;
pub mod inspections;
pub mod work_orders;
