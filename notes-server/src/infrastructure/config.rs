pub const DEFAULT_PORT: u16 = 8001;
