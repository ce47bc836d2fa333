pub mod laptop_create;
pub mod laptop_find;
pub mod laptop_search;
