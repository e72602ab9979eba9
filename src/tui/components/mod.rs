//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, status, session pill
//! - `Message`: one chat bubble (user, agent, error, thinking)
//! - `GalleryWidget`: grid of video cards
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line composer with send indicator
//! - `MessageList`: scrollable transcript + gallery, sticks to the bottom
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App`. The props come from the `core::view::View` built
//! once per frame.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── message.rs
//! ├── gallery.rs
//! ├── message_list.rs
//! └── input_box/       (composer + cursor window)
//! ```

pub mod gallery;
pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
