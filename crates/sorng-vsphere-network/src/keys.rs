//! Name extraction from host network keys.
//!
//! Physical NIC and vSwitch keys end in the object's name after the last
//! `-` (`key-vim.host.PhysicalNic-vmnic0`, `key-vim.host.VirtualSwitch-vSwitch0`).

/// The part of `key` after its last `-`, or all of `key` when it has none.
pub fn name_from_key(key: &str) -> &str {
    key.rfind('-').map_or(key, |idx| &key[idx + 1..])
}
