//! Question catalog for the lifestyle survey

use crate::correlation_core::Variable;
use serde::Serialize;

/// Identifier of one survey question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    SleepHours,
    ExerciseFrequency,
    StressLevel,
    ScreenTime,
    SocialActivity,
    Productivity,
    MoodRating,
    CaffeineIntake,
    PetAffinity,
    MusicVolume,
    ChaosEnergy,
    PizzaOpinion,
    Optimism,
    Decision,
    HomeworkStress,
    SocialBattery,
}

impl QuestionKey {
    /// Catalog order
    pub const ALL: [QuestionKey; 16] = [
        QuestionKey::SleepHours,
        QuestionKey::ExerciseFrequency,
        QuestionKey::StressLevel,
        QuestionKey::ScreenTime,
        QuestionKey::SocialActivity,
        QuestionKey::Productivity,
        QuestionKey::MoodRating,
        QuestionKey::CaffeineIntake,
        QuestionKey::PetAffinity,
        QuestionKey::MusicVolume,
        QuestionKey::ChaosEnergy,
        QuestionKey::PizzaOpinion,
        QuestionKey::Optimism,
        QuestionKey::Decision,
        QuestionKey::HomeworkStress,
        QuestionKey::SocialBattery,
    ];

    /// Variable id used in submissions and results
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::SleepHours => "sleepHours",
            QuestionKey::ExerciseFrequency => "exerciseFrequency",
            QuestionKey::StressLevel => "stressLevel",
            QuestionKey::ScreenTime => "screenTime",
            QuestionKey::SocialActivity => "socialActivity",
            QuestionKey::Productivity => "productivity",
            QuestionKey::MoodRating => "moodRating",
            QuestionKey::CaffeineIntake => "caffeineIntake",
            QuestionKey::PetAffinity => "petAffinity",
            QuestionKey::MusicVolume => "musicVolume",
            QuestionKey::ChaosEnergy => "chaosEnergy",
            QuestionKey::PizzaOpinion => "pizzaOpinion",
            QuestionKey::Optimism => "optimism",
            QuestionKey::Decision => "decision",
            QuestionKey::HomeworkStress => "homeworkStress",
            QuestionKey::SocialBattery => "socialBattery",
        }
    }

    /// Storage column name
    pub fn column(&self) -> &'static str {
        match self {
            QuestionKey::SleepHours => "sleep_hours",
            QuestionKey::ExerciseFrequency => "exercise_frequency",
            QuestionKey::StressLevel => "stress_level",
            QuestionKey::ScreenTime => "screen_time",
            QuestionKey::SocialActivity => "social_activity",
            QuestionKey::Productivity => "productivity",
            QuestionKey::MoodRating => "mood_rating",
            QuestionKey::CaffeineIntake => "caffeine_intake",
            QuestionKey::PetAffinity => "pet_affinity",
            QuestionKey::MusicVolume => "music_volume",
            QuestionKey::ChaosEnergy => "chaos_energy",
            QuestionKey::PizzaOpinion => "pizza_opinion",
            QuestionKey::Optimism => "optimism",
            QuestionKey::Decision => "decision",
            QuestionKey::HomeworkStress => "homework_stress",
            QuestionKey::SocialBattery => "social_battery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub fn question(&self) -> Question {
        let (label, description, low_label, high_label) = match self {
            QuestionKey::SleepHours => (
                "Sleep",
                "How much sleep do you usually get?",
                "Barely any",
                "Plenty",
            ),
            QuestionKey::ExerciseFrequency => (
                "Exercise",
                "How often do you exercise?",
                "Never",
                "Every day",
            ),
            QuestionKey::StressLevel => (
                "Stress",
                "How stressed do you feel lately?",
                "Zen",
                "Overwhelmed",
            ),
            QuestionKey::ScreenTime => (
                "Screen Time",
                "How much time do you spend on screens?",
                "Minimal",
                "All day",
            ),
            QuestionKey::SocialActivity => (
                "Social Activity",
                "How often do you hang out with people?",
                "Hermit",
                "Constantly",
            ),
            QuestionKey::Productivity => (
                "Productivity",
                "How productive have you been?",
                "Not at all",
                "Extremely",
            ),
            QuestionKey::MoodRating => (
                "Mood",
                "How would you rate your overall mood?",
                "Low",
                "Great",
            ),
            QuestionKey::CaffeineIntake => (
                "Caffeine",
                "How much caffeine do you drink?",
                "None",
                "Running on it",
            ),
            QuestionKey::PetAffinity => (
                "Pet Love",
                "How much do you love animals?",
                "Not a pet person",
                "Obsessed",
            ),
            QuestionKey::MusicVolume => (
                "Music Volume",
                "How loud do you play your music?",
                "Whisper",
                "Max volume",
            ),
            QuestionKey::ChaosEnergy => (
                "Chaos Energy",
                "How chaotic is your energy?",
                "Calm",
                "Pure chaos",
            ),
            QuestionKey::PizzaOpinion => (
                "Pineapple Pizza",
                "How do you feel about pineapple on pizza?",
                "Crime",
                "Delicious",
            ),
            QuestionKey::Optimism => (
                "Optimism",
                "How optimistic are you about the future?",
                "Pessimist",
                "Optimist",
            ),
            QuestionKey::Decision => (
                "Decisiveness",
                "How quickly do you make decisions?",
                "Agonize",
                "Instantly",
            ),
            QuestionKey::HomeworkStress => (
                "Homework Stress",
                "How stressful is your homework or work load?",
                "Easy",
                "Crushing",
            ),
            QuestionKey::SocialBattery => (
                "Social Battery",
                "How long does your social battery last?",
                "Drained fast",
                "Never runs out",
            ),
        };

        Question {
            key: *self,
            label,
            description,
            low_label,
            high_label,
        }
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QuestionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Display metadata for one question
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub key: QuestionKey,
    pub label: &'static str,
    pub description: &'static str,
    pub low_label: &'static str,
    pub high_label: &'static str,
}

/// All questions in catalog order
pub fn catalog() -> Vec<Question> {
    QuestionKey::ALL.iter().map(QuestionKey::question).collect()
}

/// Catalog as the variable set fed to the correlation engine
pub fn variables() -> Vec<Variable> {
    QuestionKey::ALL
        .iter()
        .map(|key| Variable::new(key.as_str(), key.question().label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_and_columns_unique() {
        let ids: HashSet<&str> = QuestionKey::ALL.iter().map(|k| k.as_str()).collect();
        let columns: HashSet<&str> = QuestionKey::ALL.iter().map(|k| k.column()).collect();
        let labels: HashSet<&str> = catalog().iter().map(|q| q.label).collect();

        assert_eq!(ids.len(), 16);
        assert_eq!(columns.len(), 16);
        assert_eq!(labels.len(), 16);
    }

    #[test]
    fn test_parse_round_trips_every_key() {
        for key in QuestionKey::ALL {
            assert_eq!(QuestionKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(QuestionKey::parse("sleep_hours"), None);
    }

    #[test]
    fn test_variables_follow_catalog_order() {
        let vars = variables();
        assert_eq!(vars.len(), 16);
        assert_eq!(vars[0], Variable::new("sleepHours", "Sleep"));
        assert_eq!(vars[15].id, "socialBattery");
    }
}
