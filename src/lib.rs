pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod input;
pub mod rules;
pub mod scene;
pub mod session;
pub mod settings;
pub mod view;

pub use game::Game;
