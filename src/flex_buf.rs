mod buf;

pub use buf::FlexBuf;
