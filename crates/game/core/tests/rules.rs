use tactics_core::rules::{ConditionChange, ReactionKind, ReactionTrigger, resolve_degree};
use tactics_core::state::{AbilityScores, Equipment, Shield, Skill, Weapon};
use tactics_core::{
    AidService, CellCoord, Combatant, ConditionKind, ConditionRules, ConditionService,
    DegreeOfSuccess, EntityId, GrappleService, HoldState, ReactionService, Roster, ScriptedDice,
    StrikeResolver, Team, apply_damage, armor_class, perform_strike, shield_block,
};

const HERO: EntityId = EntityId(1);
const FRIEND: EntityId = EntityId(2);
const OGRE: EntityId = EntityId(3);

fn party() -> Roster {
    let mut shield_arm = Equipment::default();
    shield_arm.equip_shield(Shield::new(5, 20, 10).raised());

    [
        Combatant::builder(HERO, Team(1))
            .abilities(AbilityScores::new(18, 12, 14, 10, 10, 10))
            .weapon(Weapon::melee("longsword", 1, 8))
            .position(CellCoord::new(0, 0, 0))
            .build(),
        Combatant::builder(FRIEND, Team(1))
            .position(CellCoord::new(0, 0, 1))
            .build(),
        Combatant::builder(OGRE, Team(2))
            .equipment(shield_arm)
            .position(CellCoord::new(1, 0, 0))
            .build(),
    ]
    .into_iter()
    .collect()
}

#[test]
fn natural_rolls_shift_one_step() {
    assert_eq!(resolve_degree(25, 20, 15), DegreeOfSuccess::CriticalSuccess);
    assert_eq!(resolve_degree(14, 20, 15), DegreeOfSuccess::Success);
    assert_eq!(resolve_degree(4, 20, 15), DegreeOfSuccess::Failure);
    assert_eq!(resolve_degree(15, 1, 15), DegreeOfSuccess::Failure);
    assert_eq!(resolve_degree(26, 1, 15), DegreeOfSuccess::Success);
    assert_eq!(resolve_degree(6, 1, 15), DegreeOfSuccess::CriticalFailure);
    // Boundary shifts: a natural 20 lifts dc - 10 only to failure, and a
    // natural 1 drops dc + 9 to failure.
    assert_eq!(resolve_degree(5, 20, 15), DegreeOfSuccess::Failure);
    assert_eq!(resolve_degree(24, 1, 15), DegreeOfSuccess::Failure);
}

#[test]
fn status_penalties_take_the_worst() {
    let mut roster = party();
    let service = ConditionService::default();
    let mut deltas = Vec::new();

    service.apply(&mut roster, HERO, ConditionKind::Frightened, 2, None, &mut deltas);
    service.apply(&mut roster, HERO, ConditionKind::Sickened, 3, None, &mut deltas);

    let conditions = roster.get(HERO).unwrap().conditions();
    assert_eq!(ConditionRules::status_penalty(conditions), 3);
    assert_eq!(ConditionRules::attack_penalty(conditions), 3);
    assert_eq!(ConditionRules::ac_penalty(conditions), 3);
}

#[test]
fn frightened_does_not_stack() {
    let mut roster = party();
    let service = ConditionService::default();
    let mut deltas = Vec::new();

    service.apply(&mut roster, HERO, ConditionKind::Frightened, 2, None, &mut deltas);
    service.apply(&mut roster, HERO, ConditionKind::Frightened, 3, None, &mut deltas);
    service.apply(&mut roster, HERO, ConditionKind::Frightened, 1, None, &mut deltas);

    let hero = roster.get(HERO).unwrap();
    assert_eq!(hero.conditions().value(ConditionKind::Frightened), 3);
    assert_eq!(
        deltas.iter().map(|d| d.change).collect::<Vec<_>>(),
        vec![ConditionChange::Added, ConditionChange::ValueChanged]
    );
}

#[test]
fn upgrading_a_hold_swaps_the_condition() {
    let mut roster = party();
    let mut grapples = GrappleService::default();
    let mut deltas = Vec::new();

    grapples.apply_or_refresh(&mut roster, HERO, OGRE, HoldState::Grabbed, 2, &mut deltas);
    deltas.clear();
    grapples.apply_or_refresh(&mut roster, HERO, OGRE, HoldState::Restrained, 2, &mut deltas);

    let removed: Vec<_> = deltas
        .iter()
        .filter(|d| d.change == ConditionChange::Removed)
        .collect();
    let added: Vec<_> = deltas
        .iter()
        .filter(|d| d.change == ConditionChange::Added)
        .collect();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].kind, ConditionKind::Grabbed);
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].kind, ConditionKind::Restrained);

    let ogre = roster.get(OGRE).unwrap();
    assert!(ogre.conditions().has(ConditionKind::Restrained));
    assert!(!ogre.conditions().has(ConditionKind::Grabbed));
    assert_eq!(grapples.relations().len(), 1);
}

#[test]
fn grapple_hold_lapses_after_its_turns() {
    let mut roster = party();
    let mut grapples = GrappleService::default();
    let mut deltas = Vec::new();

    // Natural 20: +7 Athletics against Fortitude DC 13.
    let mut dice = ScriptedDice::new([20]);
    let check = grapples
        .attempt_grapple(&mut dice, &mut roster, HERO, OGRE, &mut deltas)
        .unwrap();
    assert_eq!(check.degree, DegreeOfSuccess::CriticalSuccess);
    assert_eq!(grapples.holder_of(OGRE), Some(HERO));

    grapples.on_turn_ended(&mut roster, HERO, &mut deltas);
    assert_eq!(grapples.holder_of(OGRE), Some(HERO));
    grapples.on_turn_ended(&mut roster, HERO, &mut deltas);
    assert_eq!(grapples.holder_of(OGRE), None);
    assert!(!roster.get(OGRE).unwrap().conditions().has(ConditionKind::Restrained));
}

#[test]
fn prepared_aid_expires_on_helpers_next_turn() {
    let mut aid = AidService::default();
    aid.prepare_aid(FRIEND, HERO, Some(Skill::Athletics));
    assert!(aid.has_prepared_aid_for_ally(HERO));

    assert_eq!(aid.notify_turn_started(FRIEND), 1);
    assert!(!aid.has_prepared_aid_for_ally(HERO));
}

#[test]
fn prepared_aid_is_consumed_once() {
    let mut roster = party();
    let mut aid = AidService::default();
    aid.prepare_aid(FRIEND, HERO, Some(Skill::Athletics));

    let mut dice = ScriptedDice::new([20]);
    let outcome = aid
        .try_consume_aid_for_check(&mut dice, &mut roster, HERO)
        .unwrap();
    assert_eq!(outcome.helper, FRIEND);
    assert_eq!(outcome.check.degree, DegreeOfSuccess::CriticalSuccess);
    assert_eq!(outcome.bonus, 2);
    assert!(!roster.get(FRIEND).unwrap().economy.reaction_available);
    assert!(aid.try_consume_aid_for_check(&mut dice, &mut roster, HERO).is_none());
}

#[test]
fn strike_then_shield_block_then_damage() {
    let mut roster = party();
    let resolver = StrikeResolver::default();
    assert_eq!(armor_class(roster.get(OGRE).unwrap()), 15);

    // d20 10 + 7 = 17 against AC 15, then 6 on the d8.
    let mut dice = ScriptedDice::new([10, 6]);
    let strike = perform_strike(&resolver, &mut dice, &mut roster, HERO, OGRE, true).unwrap();
    assert!(strike.is_hit());
    let damage = strike.damage.unwrap();
    assert_eq!(damage.total, 10);
    assert_eq!(roster.get(HERO).unwrap().economy.attacks_this_turn, 1);

    let trigger = ReactionTrigger::PostHit {
        attacker: HERO,
        target: OGRE,
    };
    let options = ReactionService::collect_eligible_reactions(&roster, &[HERO, OGRE], trigger);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].kind, ReactionKind::ShieldBlock);

    let ogre = roster.get_mut(OGRE).unwrap();
    let blocked = shield_block(ogre, damage.total).unwrap();
    assert_eq!(blocked.remaining, 5);
    let applied = apply_damage(ogre, blocked.remaining);
    assert_eq!(applied.remaining_hp, 15);
    assert!(!applied.defeated);
}
