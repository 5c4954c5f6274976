//! Exact per-variant demand from a catalog of piece-count rules
//!
//! A catalog describes one unit (a complete piece set) as a list of typed
//! rules. Allocation scales the rules by the number of units and resolves
//! them into one count per variant, in the same order as the catalog's
//! variant keys.

use crate::io::error::{MosaicError, Result, configuration_error, infeasible, invalid_parameter};
use crate::pieces::variant::{PieceColor, PieceKind, Shade, VariantKey};
use std::fmt;
use std::str::FromStr;

/// How many copies of a piece kind one unit contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceTypeRule {
    /// Every (color, shade) variant of the kind needs `count` copies per unit
    PerVariant {
        /// Piece kind the rule applies to
        kind: PieceKind,
        /// Copies per variant per unit
        count: i64,
    },
    /// Each color of the kind needs `count` copies per unit, spread evenly over the shades
    ShadeSplit {
        /// Piece kind the rule applies to
        kind: PieceKind,
        /// Copies per color per unit
        count: i64,
    },
}

impl PieceTypeRule {
    /// Piece kind the rule applies to
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::PerVariant { kind, .. } | Self::ShadeSplit { kind, .. } => *kind,
        }
    }

    /// Per-unit multiplicity as written
    pub const fn count(&self) -> i64 {
        match self {
            Self::PerVariant { count, .. } | Self::ShadeSplit { count, .. } => *count,
        }
    }
}

impl fmt::Display for PieceTypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerVariant { kind, count } => write!(f, "{}={count}", kind.name().to_lowercase()),
            Self::ShadeSplit { kind, count } => {
                write!(f, "{}=split:{count}", kind.name().to_lowercase())
            }
        }
    }
}

impl FromStr for PieceTypeRule {
    type Err = MosaicError;

    /// Parse `kind=count` or `kind=split:count`
    fn from_str(s: &str) -> Result<Self> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| configuration_error(&s, &"expected 'kind=count' or 'kind=split:count'"))?;
        let kind: PieceKind = kind
            .parse()
            .map_err(|e: MosaicError| configuration_error(&s, &e))?;
        let value = value.trim();
        let (split, number) = value
            .strip_prefix("split:")
            .map_or((false, value), |rest| (true, rest.trim()));
        let count: i64 = number
            .parse()
            .map_err(|e| configuration_error(&s, &format!("invalid count '{number}': {e}")))?;
        Ok(if split {
            Self::ShadeSplit { kind, count }
        } else {
            Self::PerVariant { kind, count }
        })
    }
}

/// Parse a comma-separated list of rules
///
/// # Errors
///
/// Returns a configuration error for the first malformed entry
pub fn parse_rules(text: &str) -> Result<Vec<PieceTypeRule>> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}

/// Which shade receives the smaller share when a split does not divide evenly
///
/// With two shades a split count `N` becomes `floor(N/2)` on `floor_shade`
/// and `ceil(N/2)` on the other shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadeRounding {
    /// Shade rounded down
    pub floor_shade: Shade,
}

impl Default for ShadeRounding {
    fn default() -> Self {
        Self {
            floor_shade: Shade::Dark,
        }
    }
}

impl ShadeRounding {
    /// Shades in the order they receive remainder copies
    fn remainder_order(&self, shades: &[Shade]) -> Vec<Shade> {
        shades
            .iter()
            .copied()
            .filter(|&shade| shade != self.floor_shade)
            .chain(shades.iter().copied().filter(|&shade| shade == self.floor_shade))
            .collect()
    }
}

/// Exact required usage count per variant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemandVector {
    counts: Vec<usize>,
}

impl DemandVector {
    /// Wrap per-variant counts
    pub const fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Build from signed counts, rejecting negatives
    ///
    /// # Errors
    ///
    /// Returns an infeasibility error naming the first negative entry
    pub fn from_signed(counts: &[i64]) -> Result<Self> {
        counts
            .iter()
            .enumerate()
            .map(|(variant, &count)| {
                usize::try_from(count).map_err(|_negative| {
                    infeasible(&format!("variant {variant} has negative demand {count}"))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Sum of all counts, or `None` if it overflows `usize`
    pub fn total(&self) -> Option<usize> {
        self.counts
            .iter()
            .try_fold(0_usize, |sum, &count| sum.checked_add(count))
    }

    /// Number of variants
    pub const fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether there are no variants
    pub const fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for one variant
    pub fn get(&self, variant: usize) -> Option<usize> {
        self.counts.get(variant).copied()
    }

    /// Counts in variant order
    pub const fn as_slice(&self) -> &[usize] {
        self.counts.as_slice()
    }
}

/// Piece kinds, colors, shades and the rules that size one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kinds: Vec<PieceKind>,
    shades: Vec<Shade>,
    rules: Vec<PieceTypeRule>,
    rounding: ShadeRounding,
}

impl Catalog {
    /// Create a catalog over both colors
    pub fn new(kinds: Vec<PieceKind>, shades: Vec<Shade>, rules: Vec<PieceTypeRule>) -> Self {
        Self {
            kinds,
            shades,
            rules,
            rounding: ShadeRounding::default(),
        }
    }

    /// Chess set shown on light and dark squares
    ///
    /// Pawns four per variant, minor pieces and rooks one per variant,
    /// king and queen one per color split across the shades.
    pub fn standard() -> Self {
        Self::new(
            PieceKind::ALL.to_vec(),
            vec![Shade::Light, Shade::Dark],
            vec![
                PieceTypeRule::ShadeSplit {
                    kind: PieceKind::King,
                    count: 1,
                },
                PieceTypeRule::ShadeSplit {
                    kind: PieceKind::Queen,
                    count: 1,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Pawn,
                    count: 4,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Bishop,
                    count: 1,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Knight,
                    count: 1,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Rook,
                    count: 1,
                },
            ],
        )
    }

    /// Classic chess set on a single background
    pub fn unshaded() -> Self {
        Self::new(
            PieceKind::ALL.to_vec(),
            vec![Shade::Light],
            vec![
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Pawn,
                    count: 8,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Bishop,
                    count: 2,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Knight,
                    count: 2,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Rook,
                    count: 2,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::King,
                    count: 1,
                },
                PieceTypeRule::PerVariant {
                    kind: PieceKind::Queen,
                    count: 1,
                },
            ],
        )
    }

    /// Replace the shade rounding policy
    #[must_use]
    pub const fn with_rounding(mut self, rounding: ShadeRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Replace the rules
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<PieceTypeRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Piece kinds in the catalog
    pub fn kinds(&self) -> &[PieceKind] {
        &self.kinds
    }

    /// Shades in the catalog
    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    /// Rules sizing one unit
    pub fn rules(&self) -> &[PieceTypeRule] {
        &self.rules
    }

    /// Variant keys, shade-major, then color, then kind
    pub fn variant_keys(&self) -> Vec<VariantKey> {
        let mut keys = Vec::new();
        for &shade in &self.shades {
            for color in PieceColor::ALL {
                for &kind in &self.kinds {
                    keys.push(VariantKey { kind, color, shade });
                }
            }
        }
        keys
    }

    fn validate(&self) -> Result<()> {
        if self.shades.is_empty() {
            return Err(configuration_error(&"catalog", &"at least one shade is required"));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.count() < 0 {
                return Err(configuration_error(rule, &"multiplicity must not be negative"));
            }
            if !self.kinds.contains(&rule.kind()) {
                return Err(configuration_error(rule, &"piece kind is not in the catalog"));
            }
            if self.rules.iter().skip(index + 1).any(|r| r.kind() == rule.kind()) {
                return Err(configuration_error(rule, &"piece kind has more than one rule"));
            }
        }
        if let Some(kind) = self
            .kinds
            .iter()
            .find(|&&kind| !self.rules.iter().any(|r| r.kind() == kind))
        {
            return Err(configuration_error(kind, &"no rule for piece kind"));
        }
        Ok(())
    }

    fn rule_for(&self, kind: PieceKind) -> Result<&PieceTypeRule> {
        self.rules
            .iter()
            .find(|r| r.kind() == kind)
            .ok_or_else(|| configuration_error(&kind, &"no rule for piece kind"))
    }

    /// Pieces in one unit across all variants
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rules are malformed or the
    /// per-unit total overflows `usize`
    pub fn per_unit_total(&self) -> Result<usize> {
        self.validate()?;
        let colors = PieceColor::ALL.len();
        let shades = self.shades.len();
        self.rules.iter().try_fold(0_usize, |sum, rule| {
            let count = usize::try_from(rule.count())
                .map_err(|_too_large| configuration_error(rule, &"multiplicity does not fit"))?;
            let copies = match rule {
                PieceTypeRule::PerVariant { .. } => count
                    .checked_mul(colors)
                    .and_then(|n| n.checked_mul(shades)),
                PieceTypeRule::ShadeSplit { .. } => count.checked_mul(colors),
            };
            copies
                .and_then(|n| sum.checked_add(n))
                .ok_or_else(|| configuration_error(rule, &"pieces per unit overflow"))
        })
    }

    /// Exact count for every variant key when `total_units` units are used
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A piece kind has no rule or more than one rule
    /// - A multiplicity is negative or the per-unit total overflows
    /// - The total over all units overflows
    pub fn allocate(&self, total_units: usize) -> Result<DemandVector> {
        // The per-variant counts sum to exactly this, so none of them can overflow
        self.per_unit_total()?
            .checked_mul(total_units)
            .ok_or_else(|| invalid_parameter("sets", &total_units, &"total demand overflows"))?;
        let remainder_order = self.rounding.remainder_order(&self.shades);
        let shade_count = self.shades.len();

        let mut counts = Vec::new();
        for key in self.variant_keys() {
            let rule = self.rule_for(key.kind)?;
            let per_unit = rule.count().unsigned_abs() as usize;
            let total = per_unit.checked_mul(total_units).ok_or_else(|| {
                invalid_parameter("sets", &total_units, &format!("demand for {rule} overflows"))
            })?;
            let count = match rule {
                PieceTypeRule::PerVariant { .. } => total,
                PieceTypeRule::ShadeSplit { .. } => {
                    let rank = remainder_order
                        .iter()
                        .position(|&shade| shade == key.shade)
                        .unwrap_or(shade_count);
                    total / shade_count + usize::from(rank < total % shade_count)
                }
            };
            counts.push(count);
        }

        Ok(DemandVector::new(counts))
    }
}

/// Exact demand per variant for `total_units` units of `catalog`
///
/// # Errors
///
/// Returns a configuration error if the catalog's rules are malformed
pub fn allocate(total_units: usize, catalog: &Catalog) -> Result<DemandVector> {
    catalog.allocate(total_units)
}
