use revm::primitives::hardfork::SpecId;

/// Fork dependent rules the runner needs outside of the VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForkRules {
    /// Hardfork the VM executes under.
    pub spec: SpecId,
    /// EIP-161: touched empty accounts are removed when state is finalized.
    pub delete_empty_objects: bool,
}

impl ForkRules {
    /// Rules of the given hardfork.
    pub fn new(spec: SpecId) -> Self {
        Self {
            spec,
            delete_empty_objects: spec.is_enabled_in(SpecId::SPURIOUS_DRAGON),
        }
    }
}

impl From<SpecId> for ForkRules {
    fn from(spec: SpecId) -> Self {
        Self::new(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SpecId::FRONTIER, false)]
    #[case(SpecId::HOMESTEAD, false)]
    #[case(SpecId::TANGERINE, false)]
    #[case(SpecId::SPURIOUS_DRAGON, true)]
    #[case(SpecId::ISTANBUL, true)]
    #[case(SpecId::CANCUN, true)]
    fn empty_objects_are_deleted_from_spurious_dragon(
        #[case] spec: SpecId,
        #[case] delete_empty: bool,
    ) {
        assert_eq!(ForkRules::new(spec).delete_empty_objects, delete_empty);
    }
}
