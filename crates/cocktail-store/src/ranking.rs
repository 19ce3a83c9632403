//! Popularity queries derived from [`RecipeState`].
//!
//! Pure functions, recomputed on every call: deterministic given the state
//! and an explicit `now`. Cocktails with no in-window like events never
//! appear; ties keep the collection's insertion order (stable sort); each
//! board is capped at [`TOP_RANKED`] entries.

use chrono::{DateTime, Duration, TimeZone, Utc};

use cocktail_shared::constants::TOP_RANKED;
use cocktail_shared::Cocktail;

use crate::recipes::RecipeState;

/// A cocktail paired with its like count over the queried window.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCocktail {
    pub cocktail: Cocktail,
    pub like_count: usize,
}

/// All-time board: every like event counts.
pub fn total_popular(state: &RecipeState) -> Vec<RankedCocktail> {
    rank_by(state, <[DateTime<Utc>]>::len)
}

/// Weekly board: like events from the last seven days, window start
/// inclusive.
pub fn weekly_popular(state: &RecipeState, now: DateTime<Utc>) -> Vec<RankedCocktail> {
    let window_start = now - Duration::days(7);
    rank_by(state, move |log| {
        log.iter().filter(|ts| **ts >= window_start).count()
    })
}

/// Daily board: like events falling on the same calendar day as `now`, in
/// `now`'s timezone.
pub fn daily_popular<Tz: TimeZone>(state: &RecipeState, now: DateTime<Tz>) -> Vec<RankedCocktail> {
    let today = now.date_naive();
    let tz = now.timezone();
    rank_by(state, move |log| {
        log.iter()
            .filter(|ts| ts.with_timezone(&tz).date_naive() == today)
            .count()
    })
}

fn rank_by(
    state: &RecipeState,
    count: impl Fn(&[DateTime<Utc>]) -> usize,
) -> Vec<RankedCocktail> {
    let mut ranked: Vec<RankedCocktail> = state
        .cocktails
        .iter()
        .filter_map(|cocktail| {
            let n = state
                .like_history
                .get(&cocktail.id)
                .map_or(0, |log| count(log));
            (n > 0).then(|| RankedCocktail {
                cocktail: cocktail.clone(),
                like_count: n,
            })
        })
        .collect();

    // Stable sort: equal counts keep insertion order.
    ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    ranked.truncate(TOP_RANKED);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use cocktail_shared::{CocktailId, UserId};

    fn cocktail(id: &str, name: &str, created_at: DateTime<Utc>) -> Cocktail {
        Cocktail {
            id: CocktailId::from(id),
            name: name.into(),
            description: "커스텀 칵테일".into(),
            ingredients: vec!["라임".into()],
            instructions: None,
            image: None,
            owner: UserId::from("u1"),
            created_at,
            updated_at: None,
        }
    }

    fn state_with_counts(counts: &[(&str, usize)], at: DateTime<Utc>) -> RecipeState {
        let mut state = RecipeState::default();
        for (id, n) in counts {
            state.cocktails.push(cocktail(id, id, at));
            if *n > 0 {
                state
                    .like_history
                    .insert(CocktailId::from(*id), vec![at; *n]);
            }
        }
        state
    }

    #[test]
    fn unliked_cocktails_never_rank() {
        let now = Utc::now();
        let state = state_with_counts(&[("a", 0), ("b", 2)], now);

        let total = total_popular(&state);
        assert_eq!(total.len(), 1);
        assert_eq!(total[0].cocktail.name, "b");

        assert!(weekly_popular(&state_with_counts(&[("a", 0)], now), now).is_empty());
        assert!(daily_popular(&state_with_counts(&[("a", 0)], now), now).is_empty());
    }

    #[test]
    fn ties_keep_insertion_order_and_the_board_caps_at_three() {
        let now = Utc::now();
        // Four cocktails: 5, 3, 3, 1 likes; the two 3s tie.
        let state = state_with_counts(&[("first3", 3), ("top", 5), ("second3", 3), ("tail", 1)], now);

        let total = total_popular(&state);
        assert_eq!(total.len(), 3);
        assert_eq!(total[0].cocktail.name, "top");
        assert_eq!(total[1].cocktail.name, "first3");
        assert_eq!(total[2].cocktail.name, "second3");
        assert_eq!(total[0].like_count, 5);
    }

    #[test]
    fn weekly_window_is_inclusive_of_its_start() {
        let now = Utc::now();
        let mut state = state_with_counts(&[("edge", 0), ("stale", 0)], now);
        state.like_history.insert(
            CocktailId::from("edge"),
            vec![now - Duration::days(7)],
        );
        state.like_history.insert(
            CocktailId::from("stale"),
            vec![now - Duration::days(7) - Duration::seconds(1)],
        );

        let weekly = weekly_popular(&state, now);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].cocktail.name, "edge");
        assert_eq!(weekly[0].like_count, 1);
    }

    #[test]
    fn weekly_counts_only_in_window_events() {
        let now = Utc::now();
        let mut state = state_with_counts(&[("mixed", 0)], now);
        state.like_history.insert(
            CocktailId::from("mixed"),
            vec![now - Duration::days(30), now - Duration::days(1), now],
        );

        let weekly = weekly_popular(&state, now);
        assert_eq!(weekly[0].like_count, 2);
        // The total board still sees all three.
        assert_eq!(total_popular(&state)[0].like_count, 3);
    }

    #[test]
    fn daily_matches_the_calendar_day_in_the_callers_zone() {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        // 01:00 on Aug 7 in KST.
        let now = DateTime::parse_from_rfc3339("2026-08-07T01:00:00+09:00")
            .unwrap()
            .with_timezone(&kst);

        let mut state = state_with_counts(&[("today", 0), ("yesterday", 0)], now.with_timezone(&Utc));
        // 17:00 UTC on Aug 6 is 02:00 KST on Aug 7: same local day.
        state.like_history.insert(
            CocktailId::from("today"),
            vec!["2026-08-06T17:00:00Z".parse().unwrap()],
        );
        // 14:00 UTC on Aug 6 is 23:00 KST on Aug 6: the day before.
        state.like_history.insert(
            CocktailId::from("yesterday"),
            vec!["2026-08-06T14:00:00Z".parse().unwrap()],
        );

        let daily = daily_popular(&state, now);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].cocktail.name, "today");
    }
}
