use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest accepted magnitude for a price.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Most decimal places accepted on a price.
pub const MAX_AMOUNT_SCALE: u32 = 6;

/// Rejects prices outside `±MAX_AMOUNT` or finer than `MAX_AMOUNT_SCALE` places.
///
/// Within these bounds every metric the calculator derives fits in a `Decimal`.
pub fn check_amount(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.abs() > MAX_AMOUNT {
        return Err(CoreError::InvalidInput(
            field.to_string(),
            format!("{} exceeds the maximum magnitude of {}", value, MAX_AMOUNT),
        ));
    }
    if value.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(CoreError::InvalidInput(
            field.to_string(),
            format!("{} has more than {} decimal places", value, MAX_AMOUNT_SCALE),
        ));
    }
    Ok(())
}

/// A single participant in the value chain (e.g. farmer, processor, retailer).
///
/// `cost` is the price the actor pays for the product and `revenue` is the price
/// it sells at. Both default to zero when left out of the input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub revenue: Decimal,
}

impl Actor {
    pub fn new(name: impl Into<String>, cost: Decimal, revenue: Decimal) -> Self {
        Self {
            name: name.into(),
            cost,
            revenue,
        }
    }

    /// Checks both prices against the accepted range.
    pub fn check_amounts(&self) -> Result<(), CoreError> {
        check_amount("cost", self.cost)?;
        check_amount("revenue", self.revenue)
    }
}

/// Parses the compact `NAME:COST:REVENUE` form used on the command line.
///
/// The last two fields are split off from the right, so a name may itself
/// contain colons. Empty numeric fields default to zero.
impl FromStr for Actor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let revenue = parts.next();
        let cost = parts.next();
        let name = parts.next();

        let (Some(name), Some(cost), Some(revenue)) = (name, cost, revenue) else {
            return Err(CoreError::InvalidInput(
                "actor".to_string(),
                format!("expected NAME:COST:REVENUE, got '{}'", s),
            ));
        };

        Ok(Self {
            name: name.trim().to_string(),
            cost: parse_amount("cost", cost)?,
            revenue: parse_amount("revenue", revenue)?,
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<Decimal, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CoreError::InvalidInput(field.to_string(), format!("'{}' is not a number", raw)))?;
    check_amount(field, value)?;
    Ok(value)
}

/// An ordered value chain, farm-gate first and final retail last.
///
/// This is the request-scoped input for one analysis run. It is built once
/// from the collected input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueChain {
    /// Optional label for the chain, usually the commodity (e.g. "Maize").
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

impl ValueChain {
    pub fn new(title: Option<String>, actors: Vec<Actor>) -> Self {
        Self { title, actors }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_actor() {
        let actor: Actor = "Farmer:0:10.5".parse().unwrap();
        assert_eq!(actor, Actor::new("Farmer", dec!(0), dec!(10.5)));
    }

    #[test]
    fn name_may_contain_colons() {
        let actor: Actor = "Co-op: North:12:20".parse().unwrap();
        assert_eq!(actor.name, "Co-op: North");
        assert_eq!(actor.cost, dec!(12));
        assert_eq!(actor.revenue, dec!(20));
    }

    #[test]
    fn empty_amounts_default_to_zero() {
        let actor: Actor = "Trader::".parse().unwrap();
        assert_eq!(actor.cost, Decimal::ZERO);
        assert_eq!(actor.revenue, Decimal::ZERO);
    }

    #[test]
    fn negative_amounts_are_accepted() {
        let actor: Actor = "Broker:5:-2".parse().unwrap();
        assert_eq!(actor.revenue, dec!(-2));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = "Farmer:10".parse::<Actor>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "actor"));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        let err = "Farmer:ten:20".parse::<Actor>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "cost"));
    }

    #[test]
    fn rejects_amounts_finer_than_supported() {
        let err = "A:-1:0.0000000000000000000000000001".parse::<Actor>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "revenue"));
    }

    #[test]
    fn rejects_amounts_beyond_maximum() {
        let err = "A:5e28:1".parse::<Actor>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "cost"));
        assert!("A:-1000000000000:1000000000000".parse::<Actor>().is_ok());
    }

    #[test]
    fn trailing_zeros_do_not_count_towards_scale() {
        let actor: Actor = "A:1.50000000:2".parse().unwrap();
        assert_eq!(actor.cost, dec!(1.5));
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
    }

    #[test]
    fn check_amounts_covers_deserialized_actors() {
        let actor = Actor::new("Bulk", dec!(0), dec!(2000000000000));
        assert!(actor.check_amounts().is_err());
        assert!(Actor::new("Ok", dec!(0.25), dec!(10)).check_amounts().is_ok());
    }

    #[test]
    fn missing_json_fields_default() {
        let actor: Actor = serde_json::from_str(r#"{"name": "Retailer"}"#).unwrap();
        assert_eq!(actor.cost, Decimal::ZERO);
        assert_eq!(actor.revenue, Decimal::ZERO);
    }
}
