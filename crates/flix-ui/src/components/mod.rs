//! Reusable widgets shared by the report views.

pub mod bar;
