//! Memory map of the RC-S730
//!
//! The chip exposes one 16-bit address space over I2C. FeliCa blocks live at
//! the bottom, 32-bit registers at 0x0B00 and up, and the two communication
//! buffers at 0x0C00 and 0x0D00.

/// FeliCa Lite-S memory blocks
pub mod block {
    /// PAD0
    pub const PAD0: u16 = 0x0000;
    /// PAD1
    pub const PAD1: u16 = 0x0001;
    /// PAD2
    pub const PAD2: u16 = 0x0002;
    /// PAD3
    pub const PAD3: u16 = 0x0003;
    /// PAD4
    pub const PAD4: u16 = 0x0004;
    /// PAD5
    pub const PAD5: u16 = 0x0005;
    /// PAD6
    pub const PAD6: u16 = 0x0006;
    /// PAD7
    pub const PAD7: u16 = 0x0007;
    /// PAD8
    pub const PAD8: u16 = 0x0008;
    /// PAD9
    pub const PAD9: u16 = 0x0009;
    /// PAD10
    pub const PAD10: u16 = 0x000A;
    /// PAD11
    pub const PAD11: u16 = 0x000B;
    /// PAD12
    pub const PAD12: u16 = 0x000C;
    /// PAD13
    pub const PAD13: u16 = 0x000D;
    /// REG
    pub const REG: u16 = 0x000E;
    /// RC (random challenge)
    pub const RC: u16 = 0x0080;
    /// MAC
    pub const MAC: u16 = 0x0081;
    /// ID
    pub const ID: u16 = 0x0082;
    /// D_ID
    pub const D_ID: u16 = 0x0083;
    /// SER_C
    pub const SER_C: u16 = 0x0084;
    /// SYS_C
    pub const SYS_C: u16 = 0x0085;
    /// CKV
    pub const CKV: u16 = 0x0086;
    /// CK
    pub const CK: u16 = 0x0087;
    /// MC (memory configuration)
    pub const MC: u16 = 0x0088;
    /// WCNT
    pub const WCNT: u16 = 0x0090;
    /// MAC_A
    pub const MAC_A: u16 = 0x0091;
    /// STATE
    pub const STATE: u16 = 0x0092;
    /// CRC_CHECK
    pub const CRC_CHECK: u16 = 0x00A0;
}

/// 32-bit registers
pub mod reg {
    /// Operation Mode
    pub const OPMODE: u16 = 0x0B00;
    /// Tag TX Control
    pub const TAG_TX_CTRL: u16 = 0x0B04;
    /// Tag RX Control
    pub const TAG_RX_CTRL: u16 = 0x0B08;
    /// RF Status
    pub const RF_STATUS: u16 = 0x0B0C;
    /// I2C Slave Address
    pub const I2C_SLAVE_ADDR: u16 = 0x0B10;
    /// I2C Buffer Control
    pub const I2C_BUFF_CTRL: u16 = 0x0B14;
    /// I2C Status
    pub const I2C_STATUS: u16 = 0x0B18;
    /// Interrupt Mask
    pub const INT_MASK: u16 = 0x0B20;
    /// Interrupt Raw Status
    pub const INT_RAW_STATUS: u16 = 0x0B24;
    /// Interrupt Status
    pub const INT_STATUS: u16 = 0x0B28;
    /// Interrupt Clear
    pub const INT_CLEAR: u16 = 0x0B2C;
    /// Write Protect
    pub const WRT_PROTECT: u16 = 0x0B30;
    /// Standby Control
    pub const STBY_CTRL: u16 = 0x0B34;
    /// Initialize Control
    pub const INIT_CTRL: u16 = 0x0B38;
    /// Host Interface Security
    pub const HOST_IF_SECURITY: u16 = 0x0B40;
    /// Host Interface WCNT
    pub const HOST_IF_WCNT: u16 = 0x0B44;
    /// RW Control
    pub const RW_CTRL: u16 = 0x0B4C;
    /// RF Parameter
    pub const RF_PARAM: u16 = 0x0B50;
    /// Lite-S Host Through Configuration
    pub const LITES_HT_CONF: u16 = 0x0B60;
    /// Lite-S PMm
    pub const LITES_PMM: u16 = 0x0B64;
    /// Plug Configuration 1
    pub const PLUG_CONF1: u16 = 0x0B80;
    /// Plug Configuration 2
    pub const PLUG_CONF2: u16 = 0x0B84;
    /// Plug Configuration 3
    pub const PLUG_CONF3: u16 = 0x0B88;
    /// DEP Configuration
    pub const DEP_CONF: u16 = 0x0BA0;
    /// DEP PMm1
    pub const DEP_PMM1: u16 = 0x0BA4;
    /// DEP PMm2
    pub const DEP_PMM2: u16 = 0x0BA8;
    /// RW Configuration
    pub const RW_CONF: u16 = 0x0BC0;
    /// RW Timeout
    pub const RW_TIMEOUT: u16 = 0x0BC8;
}

/// Communication buffers
pub mod buf {
    /// RF communication buffer
    pub const RF_COMM: u16 = 0x0C00;
    /// I2C FeliCa communication buffer
    pub const I2C_FELICA_COMM: u16 = 0x0D00;
}
