use crate::capability::Motion;
use crate::config::SiteConfig;
use crate::utils::timing::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeroStage {
    pub page_loaded: bool,
    pub primary_visible: bool,
    pub secondary_visible: bool,
}

/// Fixed entrance schedule for the hero, measured from mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroTimeline {
    loaded_at: Millis,
    primary_at: Millis,
    secondary_at: Millis,
    taglines_at: Millis,
}

impl HeroTimeline {
    pub fn new(mounted_at: Millis, config: &SiteConfig, motion: Motion) -> Self {
        let reveal_base = mounted_at + config.hero_animation_delay_ms;
        let (primary_at, secondary_at) = match motion {
            Motion::Enhanced => (
                reveal_base + config.hero_primary_delay_ms,
                reveal_base + config.hero_secondary_delay_ms,
            ),
            // Without CSS animations the title is simply shown.
            Motion::Baseline => (mounted_at, mounted_at),
        };
        Self {
            loaded_at: mounted_at + config.page_loaded_delay_ms,
            primary_at,
            secondary_at,
            taglines_at: reveal_base + config.tagline_start_after_ms,
        }
    }

    pub fn stage(&self, now: Millis) -> HeroStage {
        HeroStage {
            page_loaded: now >= self.loaded_at,
            primary_visible: now >= self.primary_at,
            secondary_visible: now >= self.secondary_at,
        }
    }

    pub fn next_deadline(&self, now: Millis) -> Option<Millis> {
        [self.loaded_at, self.primary_at, self.secondary_at]
            .into_iter()
            .filter(|at| *at > now)
            .min()
    }

    pub fn taglines_at(&self) -> Millis {
        self.taglines_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enhanced_reveals_words_in_order() {
        let timeline = HeroTimeline::new(1_000, &SiteConfig::default(), Motion::Enhanced);

        assert_eq!(timeline.stage(1_000), HeroStage::default());
        assert_eq!(timeline.next_deadline(1_000), Some(1_200));
        assert!(timeline.stage(1_200).page_loaded);

        let partway = timeline.stage(2_300);
        assert!(partway.primary_visible);
        assert!(!partway.secondary_visible);

        assert!(timeline.stage(3_100).secondary_visible);
        assert_eq!(timeline.next_deadline(3_100), None);
        assert_eq!(timeline.taglines_at(), 4_300);
    }

    #[test]
    fn baseline_shows_title_immediately() {
        let timeline = HeroTimeline::new(0, &SiteConfig::default(), Motion::Baseline);
        let stage = timeline.stage(0);
        assert!(stage.primary_visible && stage.secondary_visible);
        assert!(!stage.page_loaded);
        assert_eq!(timeline.taglines_at(), 3_300);
    }
}
