//! L1 SPI: external provider integration (empty for now).
