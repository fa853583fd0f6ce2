use core::str::FromStr;
use engine::{ForkRules, SpecId};

use crate::ForkError;

/// Block at which `...At5` transition forks switch.
const TRANSITION_BLOCK: u64 = 5;
/// Timestamp at which `...AtTime15k` transition forks switch.
const TRANSITION_TIMESTAMP: u64 = 15_000;

/// Fork names used by the state test corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecName {
    /// Frontier.
    Frontier,
    /// Frontier, Homestead from block 5.
    FrontierToHomesteadAt5,
    /// Homestead.
    Homestead,
    /// Homestead on both sides of block 5. The DAO irregular state change is
    /// not applied.
    HomesteadToDaoAt5,
    /// Homestead, Tangerine Whistle from block 5.
    HomesteadToEIP150At5,
    /// Tangerine Whistle.
    EIP150,
    /// Spurious Dragon, enables EIP-161 state clearing.
    EIP158,
    /// Spurious Dragon, Byzantium from block 5.
    EIP158ToByzantiumAt5,
    /// Byzantium.
    Byzantium,
    /// Byzantium, Constantinople from block 5.
    ByzantiumToConstantinopleAt5,
    /// Byzantium, Petersburg from block 5.
    ByzantiumToConstantinopleFixAt5,
    /// Constantinople.
    Constantinople,
    /// Petersburg.
    ConstantinopleFix,
    /// Petersburg, Istanbul from block 5.
    ConstantinopleFixToIstanbulAt5,
    /// Istanbul.
    Istanbul,
    /// Berlin.
    Berlin,
    /// Berlin, London from block 5.
    BerlinToLondonAt5,
    /// London.
    London,
    /// Paris.
    Paris,
    /// Alias of [`SpecName::Paris`].
    Merge,
    /// Paris, Shanghai from timestamp 15000.
    ParisToShanghaiAtTime15k,
    /// Shanghai.
    Shanghai,
    /// Shanghai, Cancun from timestamp 15000.
    ShanghaiToCancunAtTime15k,
    /// Cancun.
    Cancun,
    /// Cancun, Prague from timestamp 15000.
    CancunToPragueAtTime15k,
    /// Prague.
    Prague,
    /// Osaka.
    Osaka,
}

/// Point at which a transition fork switches to its later fork.
#[derive(Clone, Copy, Debug)]
enum Activation {
    Block(u64),
    Timestamp(u64),
}

impl Activation {
    fn is_active(self, number: u64, timestamp: u64) -> bool {
        match self {
            Self::Block(block) => number >= block,
            Self::Timestamp(time) => timestamp >= time,
        }
    }
}

impl SpecName {
    /// Resolves the hardfork active at the given block, for transition forks
    /// the earlier fork before the switch point and the later one from it on.
    pub fn to_spec_id(self, number: u64, timestamp: u64) -> SpecId {
        match self.transition() {
            Some((before, after, activation)) => {
                if activation.is_active(number, timestamp) {
                    after
                } else {
                    before
                }
            }
            None => self.fork(),
        }
    }

    /// Rules in effect at the given block.
    pub fn rules(self, number: u64, timestamp: u64) -> ForkRules {
        ForkRules::new(self.to_spec_id(number, timestamp))
    }

    fn fork(self) -> SpecId {
        match self {
            Self::Frontier => SpecId::FRONTIER,
            Self::Homestead => SpecId::HOMESTEAD,
            Self::EIP150 => SpecId::TANGERINE,
            Self::EIP158 => SpecId::SPURIOUS_DRAGON,
            Self::Byzantium => SpecId::BYZANTIUM,
            Self::Constantinople => SpecId::CONSTANTINOPLE,
            Self::ConstantinopleFix => SpecId::PETERSBURG,
            Self::Istanbul => SpecId::ISTANBUL,
            Self::Berlin => SpecId::BERLIN,
            Self::London => SpecId::LONDON,
            Self::Paris | Self::Merge => SpecId::MERGE,
            Self::Shanghai => SpecId::SHANGHAI,
            Self::Cancun => SpecId::CANCUN,
            Self::Prague => SpecId::PRAGUE,
            Self::Osaka => SpecId::OSAKA,
            // Transition forks resolve through `transition`; this is the fork they start in.
            Self::FrontierToHomesteadAt5 => SpecId::FRONTIER,
            Self::HomesteadToDaoAt5 | Self::HomesteadToEIP150At5 => SpecId::HOMESTEAD,
            Self::EIP158ToByzantiumAt5 => SpecId::SPURIOUS_DRAGON,
            Self::ByzantiumToConstantinopleAt5 | Self::ByzantiumToConstantinopleFixAt5 => {
                SpecId::BYZANTIUM
            }
            Self::ConstantinopleFixToIstanbulAt5 => SpecId::PETERSBURG,
            Self::BerlinToLondonAt5 => SpecId::BERLIN,
            Self::ParisToShanghaiAtTime15k => SpecId::MERGE,
            Self::ShanghaiToCancunAtTime15k => SpecId::SHANGHAI,
            Self::CancunToPragueAtTime15k => SpecId::CANCUN,
        }
    }

    fn transition(self) -> Option<(SpecId, SpecId, Activation)> {
        let at_block = Activation::Block(TRANSITION_BLOCK);
        let at_time = Activation::Timestamp(TRANSITION_TIMESTAMP);
        let transition = match self {
            Self::FrontierToHomesteadAt5 => (SpecId::FRONTIER, SpecId::HOMESTEAD, at_block),
            Self::HomesteadToDaoAt5 => (SpecId::HOMESTEAD, SpecId::HOMESTEAD, at_block),
            Self::HomesteadToEIP150At5 => (SpecId::HOMESTEAD, SpecId::TANGERINE, at_block),
            Self::EIP158ToByzantiumAt5 => (SpecId::SPURIOUS_DRAGON, SpecId::BYZANTIUM, at_block),
            Self::ByzantiumToConstantinopleAt5 => {
                (SpecId::BYZANTIUM, SpecId::CONSTANTINOPLE, at_block)
            }
            Self::ByzantiumToConstantinopleFixAt5 => {
                (SpecId::BYZANTIUM, SpecId::PETERSBURG, at_block)
            }
            Self::ConstantinopleFixToIstanbulAt5 => {
                (SpecId::PETERSBURG, SpecId::ISTANBUL, at_block)
            }
            Self::BerlinToLondonAt5 => (SpecId::BERLIN, SpecId::LONDON, at_block),
            Self::ParisToShanghaiAtTime15k => (SpecId::MERGE, SpecId::SHANGHAI, at_time),
            Self::ShanghaiToCancunAtTime15k => (SpecId::SHANGHAI, SpecId::CANCUN, at_time),
            Self::CancunToPragueAtTime15k => (SpecId::CANCUN, SpecId::PRAGUE, at_time),
            _ => return None,
        };
        Some(transition)
    }
}

impl FromStr for SpecName {
    type Err = ForkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Frontier" => Self::Frontier,
            "FrontierToHomesteadAt5" => Self::FrontierToHomesteadAt5,
            "Homestead" => Self::Homestead,
            "HomesteadToDaoAt5" => Self::HomesteadToDaoAt5,
            "HomesteadToEIP150At5" => Self::HomesteadToEIP150At5,
            "EIP150" => Self::EIP150,
            "EIP158" => Self::EIP158,
            "EIP158ToByzantiumAt5" => Self::EIP158ToByzantiumAt5,
            "Byzantium" => Self::Byzantium,
            "ByzantiumToConstantinopleAt5" => Self::ByzantiumToConstantinopleAt5,
            "ByzantiumToConstantinopleFixAt5" => Self::ByzantiumToConstantinopleFixAt5,
            "Constantinople" => Self::Constantinople,
            "ConstantinopleFix" => Self::ConstantinopleFix,
            "ConstantinopleFixToIstanbulAt5" => Self::ConstantinopleFixToIstanbulAt5,
            "Istanbul" => Self::Istanbul,
            "Berlin" => Self::Berlin,
            "BerlinToLondonAt5" => Self::BerlinToLondonAt5,
            "London" => Self::London,
            "Paris" => Self::Paris,
            "Merge" => Self::Merge,
            "ParisToShanghaiAtTime15k" => Self::ParisToShanghaiAtTime15k,
            "Shanghai" => Self::Shanghai,
            "ShanghaiToCancunAtTime15k" => Self::ShanghaiToCancunAtTime15k,
            "Cancun" => Self::Cancun,
            "CancunToPragueAtTime15k" => Self::CancunToPragueAtTime15k,
            "Prague" => Self::Prague,
            "Osaka" => Self::Osaka,
            _ => return Err(ForkError::Unsupported(s.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Frontier", SpecId::FRONTIER, false)]
    #[case("Homestead", SpecId::HOMESTEAD, false)]
    #[case("EIP150", SpecId::TANGERINE, false)]
    #[case("EIP158", SpecId::SPURIOUS_DRAGON, true)]
    #[case("Byzantium", SpecId::BYZANTIUM, true)]
    #[case("Constantinople", SpecId::CONSTANTINOPLE, true)]
    #[case("ConstantinopleFix", SpecId::PETERSBURG, true)]
    #[case("Istanbul", SpecId::ISTANBUL, true)]
    #[case("Berlin", SpecId::BERLIN, true)]
    #[case("London", SpecId::LONDON, true)]
    #[case("Merge", SpecId::MERGE, true)]
    #[case("Paris", SpecId::MERGE, true)]
    #[case("Shanghai", SpecId::SHANGHAI, true)]
    #[case("Cancun", SpecId::CANCUN, true)]
    #[case("Prague", SpecId::PRAGUE, true)]
    #[case("Osaka", SpecId::OSAKA, true)]
    fn resolves_forks(#[case] name: &str, #[case] spec: SpecId, #[case] delete_empty: bool) {
        let rules = name.parse::<SpecName>().unwrap().rules(1, 1_000);
        assert_eq!(rules.spec, spec);
        assert_eq!(rules.delete_empty_objects, delete_empty);
    }

    #[rstest]
    #[case("FrontierToHomesteadAt5", SpecId::FRONTIER, SpecId::HOMESTEAD)]
    #[case("HomesteadToEIP150At5", SpecId::HOMESTEAD, SpecId::TANGERINE)]
    #[case("HomesteadToDaoAt5", SpecId::HOMESTEAD, SpecId::HOMESTEAD)]
    #[case("EIP158ToByzantiumAt5", SpecId::SPURIOUS_DRAGON, SpecId::BYZANTIUM)]
    #[case("ByzantiumToConstantinopleAt5", SpecId::BYZANTIUM, SpecId::CONSTANTINOPLE)]
    #[case("ByzantiumToConstantinopleFixAt5", SpecId::BYZANTIUM, SpecId::PETERSBURG)]
    #[case("ConstantinopleFixToIstanbulAt5", SpecId::PETERSBURG, SpecId::ISTANBUL)]
    #[case("BerlinToLondonAt5", SpecId::BERLIN, SpecId::LONDON)]
    fn block_transitions_switch_at_five(
        #[case] name: &str,
        #[case] before: SpecId,
        #[case] after: SpecId,
    ) {
        let spec: SpecName = name.parse().unwrap();
        assert_eq!(spec.to_spec_id(4, 100_000), before);
        assert_eq!(spec.to_spec_id(5, 0), after);
        assert_eq!(spec.to_spec_id(6, 0), after);
    }

    #[rstest]
    #[case("ParisToShanghaiAtTime15k", SpecId::MERGE, SpecId::SHANGHAI)]
    #[case("ShanghaiToCancunAtTime15k", SpecId::SHANGHAI, SpecId::CANCUN)]
    #[case("CancunToPragueAtTime15k", SpecId::CANCUN, SpecId::PRAGUE)]
    fn time_transitions_switch_at_15k(
        #[case] name: &str,
        #[case] before: SpecId,
        #[case] after: SpecId,
    ) {
        let spec: SpecName = name.parse().unwrap();
        assert_eq!(spec.to_spec_id(100, 14_999), before);
        assert_eq!(spec.to_spec_id(0, 15_000), after);
    }

    #[rstest]
    #[case("Quux")]
    #[case("")]
    #[case("istanbul")]
    #[case("Istanbul+1884")]
    fn rejects_unknown_forks(#[case] name: &str) {
        let err = name.parse::<SpecName>().unwrap_err();
        assert_eq!(err.to_string(), format!("unsupported fork {name:?}"));
    }
}
