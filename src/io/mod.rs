mod cursor;

pub use cursor::{
    fixed_str, read_f32_le, read_f64_le, read_i32_le, read_u16_le, read_u32_le, read_u64_le,
    FileCursor,
};
