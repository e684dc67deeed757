#[macro_use]
mod wire_enum;
pub mod question;
pub mod settings;

pub use question::{Answer, Comment, OrderType, Question, Tag, TagData, VoteData};
pub use settings::{
    FontType, LineSpacingType, SettingsInfo, TextBoldnessType, TextSizeType, ThemeType, User,
};
pub use wire_enum::ParseWireEnumError;
