use hecs::World;

use crate::{Body, Events, GameEvent, Puck, Score, Side, Table, Time};

/// Check if the puck went fully through a goal; returns the scorer
pub fn check_scoring(
    world: &World,
    table: &Table,
    score: &mut Score,
    events: &mut Events,
    time: &Time,
) -> Option<Side> {
    let mut query = world.query::<(&Puck, &Body)>();
    let (_entity, (_puck, body)) = query.iter().next()?;

    // The defender of the crossed goal concedes
    let scorer = table.goal_crossed(body.pos)?.other();
    score.increment(scorer);
    events.emit(GameEvent::Goal { scorer }, time.now);

    log::debug!(
        "goal for {:?} at {:?}, score {}-{}",
        scorer,
        body.pos,
        score.player,
        score.opponent
    );
    Some(scorer)
}
