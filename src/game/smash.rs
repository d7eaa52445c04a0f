// Smash resolution shared by both paddles

use super::state::Side;

/// How hard a smash landed, as read by effect and label collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmashTier {
    Normal,
    Strong,
    Mega,
}

impl SmashTier {
    pub fn from_power(power: f32) -> Self {
        if power >= 2.0 {
            SmashTier::Mega
        } else if power >= 1.5 {
            SmashTier::Strong
        } else {
            SmashTier::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SmashTier::Mega => "MEGA SMASH!",
            SmashTier::Strong | SmashTier::Normal => "SMASH!",
        }
    }
}

/// A qualifying smash, emitted once per hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmashEvent {
    pub actor: Side,
    pub power: f32,
}

impl SmashEvent {
    pub fn tier(&self) -> SmashTier {
        SmashTier::from_power(self.power)
    }
}

/// Paddle and ball state at the moment of contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub paddle_vx: f32,
    pub paddle_vy: f32,
    pub charge: u32,
    pub max_charge: u32,
    /// Ball `dy` before the hit changes it.
    pub incoming_dy: f32,
}

impl Contact {
    fn charge_ratio(&self) -> f32 {
        if self.max_charge == 0 {
            0.0
        } else {
            self.charge as f32 / self.max_charge as f32
        }
    }
}

/// Decide whether a hit is a smash and how strong it is.
///
/// Returns `None` for a normal return (power 1.0). When several rules
/// qualify the strongest power wins; powers are never summed.
pub fn resolve(side: Side, contact: &Contact, cpu_speed: f32) -> Option<f32> {
    match side {
        Side::Player => resolve_player(contact),
        Side::Cpu => resolve_cpu(contact, cpu_speed),
    }
}

fn resolve_player(contact: &Contact) -> Option<f32> {
    let ratio = contact.charge_ratio();
    let mut power: Option<f32> = None;

    // Moving right into a ball that arrives from the right
    if contact.paddle_vx > 0.0 {
        power = Some(1.5 + ratio * 1.0);
    }

    let counter_vertical = (contact.incoming_dy > 0.0 && contact.paddle_vy < 0.0)
        || (contact.incoming_dy < 0.0 && contact.paddle_vy > 0.0);
    if counter_vertical {
        power = Some(strongest(power, 1.3 + ratio * 0.7));
    }

    power
}

fn resolve_cpu(contact: &Contact, cpu_speed: f32) -> Option<f32> {
    let ratio = contact.charge_ratio();
    let mut power: Option<f32> = None;

    if contact.paddle_vx < 0.0 {
        power = Some(1.3 + ratio * 0.5);
    }

    if contact.paddle_vy.abs() > cpu_speed * 0.5 {
        power = Some(strongest(power, 1.2 + ratio * 0.4));
    }

    power
}

fn strongest(current: Option<f32>, candidate: f32) -> f32 {
    current.map_or(candidate, |p| p.max(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(vx: f32, vy: f32, charge: u32, incoming_dy: f32) -> Contact {
        Contact {
            paddle_vx: vx,
            paddle_vy: vy,
            charge,
            max_charge: 60,
            incoming_dy,
        }
    }

    #[test]
    fn test_player_horizontal_full_charge_is_exactly_two_and_a_half() {
        let power = resolve(Side::Player, &contact(8.0, 0.0, 60, 2.0), 6.0);
        assert_eq!(power, Some(2.5));
        assert_eq!(SmashTier::from_power(2.5), SmashTier::Mega);
    }

    #[test]
    fn test_player_horizontal_without_charge() {
        assert_eq!(resolve(Side::Player, &contact(8.0, 0.0, 0, 2.0), 6.0), Some(1.5));
    }

    #[test]
    fn test_player_vertical_counter_motion() {
        // Ball falling, paddle rising
        let power = resolve(Side::Player, &contact(0.0, -8.0, 0, 3.0), 6.0).unwrap();
        assert!((power - 1.3).abs() < 1e-6);

        // Ball rising, paddle falling, fully charged
        let power = resolve(Side::Player, &contact(0.0, 8.0, 60, -3.0), 6.0).unwrap();
        assert!((power - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_player_same_direction_is_not_a_smash() {
        assert_eq!(resolve(Side::Player, &contact(0.0, 8.0, 60, 3.0), 6.0), None);
        assert_eq!(resolve(Side::Player, &contact(-8.0, 0.0, 60, 3.0), 6.0), None);
        assert_eq!(resolve(Side::Player, &contact(0.0, 0.0, 60, 0.0), 6.0), None);
    }

    #[test]
    fn test_player_rules_take_the_max_not_the_sum() {
        // Both rules qualify at zero charge: 1.5 vs 1.3
        let power = resolve(Side::Player, &contact(8.0, -8.0, 0, 3.0), 6.0).unwrap();
        assert_eq!(power, 1.5);
    }

    #[test]
    fn test_player_power_stays_in_documented_ranges() {
        for charge in 0..=60 {
            let horizontal = resolve(Side::Player, &contact(8.0, 0.0, charge, 1.0), 6.0).unwrap();
            assert!((1.5..=2.5).contains(&horizontal));

            let vertical = resolve(Side::Player, &contact(0.0, -8.0, charge, 1.0), 6.0).unwrap();
            assert!((1.3..=2.0 + 1e-6).contains(&vertical));
        }
    }

    #[test]
    fn test_cpu_fast_vertical_motion() {
        // Threshold is half the CPU speed: 3.0
        assert_eq!(resolve(Side::Cpu, &contact(0.0, 3.0, 60, 1.0), 6.0), None);

        let power = resolve(Side::Cpu, &contact(0.0, -6.0, 0, 1.0), 6.0).unwrap();
        assert!((power - 1.2).abs() < 1e-6);

        let power = resolve(Side::Cpu, &contact(0.0, 9.0, 60, 1.0), 6.0).unwrap();
        assert!((power - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_cpu_horizontal_counter_motion() {
        let power = resolve(Side::Cpu, &contact(-4.0, 0.0, 60, 1.0), 6.0).unwrap();
        assert!((power - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(SmashTier::from_power(1.2), SmashTier::Normal);
        assert_eq!(SmashTier::from_power(1.5), SmashTier::Strong);
        assert_eq!(SmashTier::from_power(1.99), SmashTier::Strong);
        assert_eq!(SmashTier::from_power(2.0), SmashTier::Mega);
        assert_eq!(SmashTier::Mega.label(), "MEGA SMASH!");
        assert_eq!(SmashTier::Strong.label(), "SMASH!");
    }
}
