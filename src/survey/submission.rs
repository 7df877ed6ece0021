//! Typed survey submission record

use super::fingerprint::{DeviceFingerprint, ANONYMOUS_FINGERPRINT};
use super::questions::QuestionKey;
use crate::correlation_core::{MAX_RATING, MIN_RATING};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    AnswerOutOfRange { question: QuestionKey, value: u8 },
}

impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyError::AnswerOutOfRange { question, value } => write!(
                f,
                "Answer {} for {} is outside {}..={}",
                value, question, MIN_RATING, MAX_RATING
            ),
        }
    }
}

impl std::error::Error for SurveyError {}

/// One respondent's answers; `None` means the question was skipped
///
/// Unknown keys are rejected so a misspelled question id cannot vanish silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SurveyData {
    pub sleep_hours: Option<u8>,
    pub exercise_frequency: Option<u8>,
    pub stress_level: Option<u8>,
    pub screen_time: Option<u8>,
    pub social_activity: Option<u8>,
    pub productivity: Option<u8>,
    pub mood_rating: Option<u8>,
    pub caffeine_intake: Option<u8>,
    pub pet_affinity: Option<u8>,
    pub music_volume: Option<u8>,
    pub chaos_energy: Option<u8>,
    pub pizza_opinion: Option<u8>,
    pub optimism: Option<u8>,
    pub decision: Option<u8>,
    pub homework_stress: Option<u8>,
    pub social_battery: Option<u8>,
}

impl SurveyData {
    pub fn answer(&self, key: QuestionKey) -> Option<u8> {
        match key {
            QuestionKey::SleepHours => self.sleep_hours,
            QuestionKey::ExerciseFrequency => self.exercise_frequency,
            QuestionKey::StressLevel => self.stress_level,
            QuestionKey::ScreenTime => self.screen_time,
            QuestionKey::SocialActivity => self.social_activity,
            QuestionKey::Productivity => self.productivity,
            QuestionKey::MoodRating => self.mood_rating,
            QuestionKey::CaffeineIntake => self.caffeine_intake,
            QuestionKey::PetAffinity => self.pet_affinity,
            QuestionKey::MusicVolume => self.music_volume,
            QuestionKey::ChaosEnergy => self.chaos_energy,
            QuestionKey::PizzaOpinion => self.pizza_opinion,
            QuestionKey::Optimism => self.optimism,
            QuestionKey::Decision => self.decision,
            QuestionKey::HomeworkStress => self.homework_stress,
            QuestionKey::SocialBattery => self.social_battery,
        }
    }

    pub fn set_answer(&mut self, key: QuestionKey, value: Option<u8>) {
        let slot = match key {
            QuestionKey::SleepHours => &mut self.sleep_hours,
            QuestionKey::ExerciseFrequency => &mut self.exercise_frequency,
            QuestionKey::StressLevel => &mut self.stress_level,
            QuestionKey::ScreenTime => &mut self.screen_time,
            QuestionKey::SocialActivity => &mut self.social_activity,
            QuestionKey::Productivity => &mut self.productivity,
            QuestionKey::MoodRating => &mut self.mood_rating,
            QuestionKey::CaffeineIntake => &mut self.caffeine_intake,
            QuestionKey::PetAffinity => &mut self.pet_affinity,
            QuestionKey::MusicVolume => &mut self.music_volume,
            QuestionKey::ChaosEnergy => &mut self.chaos_energy,
            QuestionKey::PizzaOpinion => &mut self.pizza_opinion,
            QuestionKey::Optimism => &mut self.optimism,
            QuestionKey::Decision => &mut self.decision,
            QuestionKey::HomeworkStress => &mut self.homework_stress,
            QuestionKey::SocialBattery => &mut self.social_battery,
        };
        *slot = value;
    }

    /// Answers in catalog order, one slot per question
    pub fn answers(&self) -> Vec<Option<u8>> {
        QuestionKey::ALL.iter().map(|key| self.answer(*key)).collect()
    }

    /// Reject any answer outside the 1-7 scale
    pub fn validate(&self) -> Result<(), SurveyError> {
        for key in QuestionKey::ALL {
            if let Some(value) = self.answer(key) {
                if !(MIN_RATING..=MAX_RATING).contains(&value) {
                    return Err(SurveyError::AnswerOutOfRange { question: key, value });
                }
            }
        }
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.answers().iter().filter(|a| a.is_some()).count()
    }
}

/// Client payload: bare answers, or answers plus the device they came from
///
/// An object with an `answers` key is always read as the wrapped form, so a malformed
/// wrapped payload is an error rather than an empty bare one.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPayload {
    WithDevice {
        answers: SurveyData,
        device: Option<DeviceFingerprint>,
    },
    Bare(SurveyData),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedPayload {
    answers: SurveyData,
    #[serde(default)]
    device: Option<DeviceFingerprint>,
}

impl<'de> Deserialize<'de> for SubmissionPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let wrapped = value
            .as_object()
            .map_or(false, |object| object.contains_key("answers"));

        if wrapped {
            let WrappedPayload { answers, device } =
                serde_json::from_value(value).map_err(D::Error::custom)?;
            Ok(SubmissionPayload::WithDevice { answers, device })
        } else {
            serde_json::from_value(value)
                .map(SubmissionPayload::Bare)
                .map_err(D::Error::custom)
        }
    }
}

impl SubmissionPayload {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Split into answers and identity token
    pub fn into_parts(self) -> (SurveyData, String) {
        match self {
            SubmissionPayload::WithDevice {
                answers,
                device: Some(device),
            } => (answers, device.hash()),
            SubmissionPayload::WithDevice { answers, device: None } => {
                (answers, ANONYMOUS_FINGERPRINT.to_string())
            }
            SubmissionPayload::Bare(answers) => (answers, ANONYMOUS_FINGERPRINT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_with_skips() {
        let json = r#"{"sleepHours":5,"stressLevel":null,"pizzaOpinion":7,"socialBattery":1}"#;

        let data: SurveyData = serde_json::from_str(json).unwrap();
        assert_eq!(data.sleep_hours, Some(5));
        assert_eq!(data.stress_level, None);
        assert_eq!(data.exercise_frequency, None);
        assert_eq!(data.answer(QuestionKey::PizzaOpinion), Some(7));
        assert_eq!(data.answered_count(), 3);
    }

    #[test]
    fn test_answers_follow_catalog_order() {
        let mut data = SurveyData::default();
        data.set_answer(QuestionKey::SleepHours, Some(2));
        data.set_answer(QuestionKey::SocialBattery, Some(6));

        let answers = data.answers();
        assert_eq!(answers.len(), QuestionKey::ALL.len());
        assert_eq!(answers[0], Some(2));
        assert_eq!(answers[15], Some(6));
        assert!(answers[1..15].iter().all(Option::is_none));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut data = SurveyData::default();
        data.set_answer(QuestionKey::MoodRating, Some(7));
        assert!(data.validate().is_ok());

        data.set_answer(QuestionKey::Optimism, Some(9));
        assert_eq!(
            data.validate(),
            Err(SurveyError::AnswerOutOfRange {
                question: QuestionKey::Optimism,
                value: 9
            })
        );

        data.set_answer(QuestionKey::Optimism, Some(0));
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut data = SurveyData::default();
        data.set_answer(QuestionKey::HomeworkStress, Some(4));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["homeworkStress"], 4);
        assert!(json["caffeineIntake"].is_null());
    }

    #[test]
    fn test_payload_with_device() {
        let json = r#"{
            "answers": {"moodRating": 6},
            "device": {
                "screenWidth": 1920, "screenHeight": 1080, "pixelRatio": 2,
                "timezone": "Europe/Berlin", "language": "en-US", "platform": "MacIntel"
            }
        }"#;

        let (answers, fingerprint) = SubmissionPayload::from_json(json).unwrap().into_parts();
        assert_eq!(answers.mood_rating, Some(6));
        assert_eq!(fingerprint, "939872e378a25f75");
    }

    #[test]
    fn test_bare_payload_is_anonymous() {
        let (answers, fingerprint) = SubmissionPayload::from_json(r#"{"optimism":2}"#)
            .unwrap()
            .into_parts();
        assert_eq!(answers.optimism, Some(2));
        assert_eq!(fingerprint, ANONYMOUS_FINGERPRINT);

        let (_, fingerprint) = SubmissionPayload::from_json(r#"{"answers":{"optimism":2}}"#)
            .unwrap()
            .into_parts();
        assert_eq!(fingerprint, ANONYMOUS_FINGERPRINT);
    }

    #[test]
    fn test_payload_rejects_non_object() {
        assert!(SubmissionPayload::from_json(r#""hello""#).is_err());
        assert!(SubmissionPayload::from_json(r#"{"sleepHours":"lots"}"#).is_err());
    }

    #[test]
    fn test_malformed_wrapped_payload_is_error() {
        let bad_answer = r#"{"answers":{"sleepHours":"lots"}}"#;
        assert!(SubmissionPayload::from_json(bad_answer).is_err());

        let too_large = r#"{"answers":{"moodRating":300}}"#;
        assert!(SubmissionPayload::from_json(too_large).is_err());

        let partial_device =
            r#"{"answers":{"moodRating":6,"optimism":5},"device":{"screenWidth":1920}}"#;
        assert!(SubmissionPayload::from_json(partial_device).is_err());

        let stray_key = r#"{"answers":{"moodRating":6},"extra":true}"#;
        assert!(SubmissionPayload::from_json(stray_key).is_err());
    }

    #[test]
    fn test_unknown_answer_key_rejected() {
        assert!(SubmissionPayload::from_json(r#"{"sleepHour":3}"#).is_err());
        assert!(SubmissionPayload::from_json(r#"{"answers":{"moodRatng":3}}"#).is_err());
    }
}
