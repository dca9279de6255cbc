pub mod r#trait;
pub use r#trait::{InputEvent, WindowEngine};

pub mod glfw_window_engine;
pub use glfw_window_engine::GlfwWindowEngine;
