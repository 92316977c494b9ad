/// Bitmask flags for `COM_REFRESH`'s single sub-command byte.
///
/// ref: https://dev.mysql.com/doc/internals/en/com-refresh.html
pub struct RefreshFlags;

impl RefreshFlags {
    pub const GRANT: u8 = 0x01;
    pub const LOG: u8 = 0x02;
    pub const TABLES: u8 = 0x04;
    pub const HOSTS: u8 = 0x08;
    pub const STATUS: u8 = 0x10;
    pub const THREADS: u8 = 0x20;
    pub const SLAVE: u8 = 0x40;
    pub const MASTER: u8 = 0x80;
}
