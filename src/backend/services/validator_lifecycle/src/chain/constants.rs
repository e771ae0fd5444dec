use chain_models::ids::Address;

/// Address of the warp message verification precompile.
///
/// Must match the chain bit-for-bit: 0x0200000000000000000000000000000000000005
pub const WARP_PRECOMPILE_ADDRESS: Address = Address([
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x05,
]);

/// Topic hash of the precompile's "message sent" event.
///
/// 0x56600c567728a800c0aa927500f831cb451df66a7af570eb4df4dfbf4674887d
pub const WARP_MESSAGE_SENT_TOPIC: [u8; 32] = [
    0x56, 0x60, 0x0c, 0x56, 0x77, 0x28, 0xa8, 0x00, 0xc0, 0xaa, 0x92, 0x75, 0x00, 0xf8, 0x31,
    0xcb, 0x45, 0x1d, 0xf6, 0x6a, 0x7a, 0xf5, 0x70, 0xeb, 0x4d, 0xf4, 0xdf, 0xbf, 0x46, 0x74,
    0x88, 0x7d,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_their_hex_forms() {
        assert_eq!(
            WARP_PRECOMPILE_ADDRESS.to_string(),
            "0x0200000000000000000000000000000000000005"
        );
        assert_eq!(
            hex::encode(WARP_MESSAGE_SENT_TOPIC),
            "56600c567728a800c0aa927500f831cb451df66a7af570eb4df4dfbf4674887d"
        );
    }
}
