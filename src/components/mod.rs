#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod map_canvas;
pub mod route_form;
pub mod toast;
pub mod tracked_list;
