/// Volume strictly above the ceiling counts as abnormal.
pub fn is_volume_spike(volume: u64, ceiling: u64) -> bool {
    volume > ceiling
}
