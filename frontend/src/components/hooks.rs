use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::utils::timing::{self, Millis};

/// Runs `on_due` once the clock reaches `deadline`, then re-renders the
/// component. A changed deadline cancels the pending timer.
#[hook]
pub fn use_deadline<F>(deadline: Option<Millis>, on_due: F)
where
    F: Fn(Millis) + 'static,
{
    let generation = use_state(|| 0u64);
    let deps = (deadline, *generation);

    use_effect_with_deps(
        move |(deadline, _): &(Option<Millis>, u64)| {
            let timer = deadline.map(|at| {
                let delay = u32::try_from(at.saturating_sub(timing::now())).unwrap_or(u32::MAX);
                Timeout::new(delay, move || {
                    on_due(timing::now().max(at));
                    generation.set(*generation + 1);
                })
            });
            move || drop(timer)
        },
        deps,
    );
}
