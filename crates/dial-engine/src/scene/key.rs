use core::cmp::Ordering;

/// Render pass bucket. Opaque geometry is drawn before anything blended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Pass {
    Opaque,
    Transparent,
}

/// Sort key for draw items.
///
/// Ordering rules:
/// 1) `pass`: opaque before transparent
/// 2) transparent only: `depth` descending (back-to-front)
/// 3) `order`: ascending (scene insertion order)
#[derive(Debug, Copy, Clone)]
pub struct SortKey {
    pub pass: Pass,
    /// View-space distance of the node origin from the camera.
    pub depth: f32,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(pass: Pass, depth: f32, order: u32) -> Self {
        Self { pass, depth, order }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pass
            .cmp(&other.pass)
            .then_with(|| match self.pass {
                Pass::Opaque => Ordering::Equal,
                Pass::Transparent => other.depth.total_cmp(&self.depth),
            })
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_ignores_depth() {
        let near = SortKey::new(Pass::Opaque, 1.0, 1);
        let far = SortKey::new(Pass::Opaque, 100.0, 0);
        assert!(far < near);
    }

    #[test]
    fn transparent_is_back_to_front() {
        let near = SortKey::new(Pass::Transparent, 1.0, 0);
        let far = SortKey::new(Pass::Transparent, 100.0, 1);
        assert!(far < near);
    }

    #[test]
    fn opaque_before_transparent() {
        let t = SortKey::new(Pass::Transparent, 1_000.0, 0);
        let o = SortKey::new(Pass::Opaque, 0.0, 9);
        assert!(o < t);
    }

    #[test]
    fn equal_depth_falls_back_to_order() {
        let a = SortKey::new(Pass::Transparent, 5.0, 2);
        let b = SortKey::new(Pass::Transparent, 5.0, 3);
        assert!(a < b);
    }
}
