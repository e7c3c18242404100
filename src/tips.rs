//! Static catalogue of general health tips, grouped by category

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Sleep,
    Water,
    Exercise,
    Mental,
}

impl TipCategory {
    pub const ALL: [TipCategory; 4] = [
        TipCategory::Sleep,
        TipCategory::Water,
        TipCategory::Exercise,
        TipCategory::Mental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipCategory::Sleep => "sleep",
            TipCategory::Water => "water",
            TipCategory::Exercise => "exercise",
            TipCategory::Mental => "mental",
        }
    }

    /// Tip category matching a recommendation category, if any
    pub fn for_recommendation(category: Category) -> Option<Self> {
        match category {
            Category::Sleep => Some(TipCategory::Sleep),
            Category::Water => Some(TipCategory::Water),
            Category::Exercise => Some(TipCategory::Exercise),
            Category::Mood => Some(TipCategory::Mental),
            Category::General => None,
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("mood") {
            return Ok(TipCategory::Mental);
        }
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown tip category '{}' (sleep, water, exercise, mental)", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub id: &'static str,
    pub category: TipCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub source: Option<&'static str>,
}

pub const TIPS: &[Tip] = &[
    Tip {
        id: "sleep-1",
        category: TipCategory::Sleep,
        title: "Consistent Sleep Schedule",
        description: "Try to go to bed and wake up at the same time every day, even on weekends, to regulate your body's internal clock.",
        source: Some("Sleep Foundation"),
    },
    Tip {
        id: "sleep-2",
        category: TipCategory::Sleep,
        title: "Create a Restful Environment",
        description: "Keep your bedroom cool, quiet, and dark. Consider using earplugs, an eye mask, or a white noise machine if needed.",
        source: Some("Mayo Clinic"),
    },
    Tip {
        id: "sleep-3",
        category: TipCategory::Sleep,
        title: "Limit Screen Time",
        description: "The blue light from phones, tablets, and computers can interfere with your ability to fall asleep. Try to avoid screens 1-2 hours before bedtime.",
        source: Some("Harvard Health"),
    },
    Tip {
        id: "water-1",
        category: TipCategory::Water,
        title: "Morning Hydration",
        description: "Drink a glass of water first thing in the morning to rehydrate after sleep and kickstart your metabolism.",
        source: Some("Cleveland Clinic"),
    },
    Tip {
        id: "water-2",
        category: TipCategory::Water,
        title: "Infused Water",
        description: "If you find plain water boring, try adding fruits, vegetables, or herbs like lemon, cucumber, or mint for natural flavor.",
        source: Some("American Heart Association"),
    },
    Tip {
        id: "water-3",
        category: TipCategory::Water,
        title: "Hydration Apps",
        description: "Consider using a hydration tracking app that sends reminders throughout the day to help you meet your water intake goals.",
        source: Some("Healthline"),
    },
    Tip {
        id: "exercise-1",
        category: TipCategory::Exercise,
        title: "Start Small",
        description: "Begin with just 10 minutes of activity daily and gradually increase. Even short bursts of exercise provide health benefits.",
        source: Some("CDC"),
    },
    Tip {
        id: "exercise-2",
        category: TipCategory::Exercise,
        title: "Mix Cardio & Strength",
        description: "Incorporate both cardiovascular exercise and strength training for optimal health. Aim for at least 2 days of strength training per week.",
        source: Some("American Heart Association"),
    },
    Tip {
        id: "exercise-3",
        category: TipCategory::Exercise,
        title: "Active Throughout Day",
        description: "Take breaks to stand or walk during long periods of sitting. Try to accumulate movement throughout your day.",
        source: Some("World Health Organization"),
    },
    Tip {
        id: "mental-1",
        category: TipCategory::Mental,
        title: "Mindful Breathing",
        description: "Take 5 minutes daily to focus on your breath. Breathe in for 4 counts, hold for 2, and exhale for 6 to reduce stress.",
        source: Some("Mindfulness Institute"),
    },
    Tip {
        id: "mental-2",
        category: TipCategory::Mental,
        title: "Digital Detox",
        description: "Schedule regular breaks from social media and news consumption to reduce anxiety and improve mental clarity.",
        source: Some("Psychology Today"),
    },
    Tip {
        id: "mental-3",
        category: TipCategory::Mental,
        title: "Gratitude Practice",
        description: "Write down three things you're grateful for each day to increase positive emotions and overall life satisfaction.",
        source: Some("Journal of Happiness Studies"),
    },
];

/// Tips in one category, in catalogue order
pub fn by_category(category: TipCategory) -> impl Iterator<Item = &'static Tip> {
    TIPS.iter().filter(move |tip| tip.category == category)
}

/// Featured tip for a date; stable within a day, rotating through the catalogue
pub fn tip_of_the_day(date: NaiveDate) -> &'static Tip {
    &TIPS[date.num_days_from_ce().rem_euclid(TIPS.len() as i32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_tips_per_category() {
        for category in TipCategory::ALL {
            let tips: Vec<_> = by_category(category).collect();
            assert_eq!(tips.len(), 3, "{}", category);
            assert!(tips.iter().all(|tip| tip.id.starts_with(category.as_str())));
            assert!(tips.iter().all(|tip| tip.source.is_some()));
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Sleep".parse::<TipCategory>().unwrap(), TipCategory::Sleep);
        assert_eq!("mood".parse::<TipCategory>().unwrap(), TipCategory::Mental);
        assert!("diet".parse::<TipCategory>().is_err());
    }

    #[test]
    fn test_recommendation_categories_map_to_tips() {
        assert_eq!(TipCategory::for_recommendation(Category::Mood), Some(TipCategory::Mental));
        assert_eq!(TipCategory::for_recommendation(Category::General), None);
    }

    #[test]
    fn test_tip_of_the_day_rotates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let next = day.succ_opt().unwrap();

        assert_eq!(tip_of_the_day(day), tip_of_the_day(day));
        assert_ne!(tip_of_the_day(day).id, tip_of_the_day(next).id);
    }
}
