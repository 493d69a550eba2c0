use serde::{Deserialize, Serialize};

/// Body of `POST /predictions`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub version: String,
    pub input: PredictionInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    pub image: String,
    pub style: String,
    pub negative_prompt: String,
}

/// A prediction job as reported by the service. The service owns it; the
/// client only reads it via polling.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    /// Statuses this client does not know stay in the polling loop; the
    /// attempt budget bounds them.
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PredictionStatus::Succeeded | PredictionStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_running_job() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"id":"p1","status":"processing"}"#).unwrap();
        assert_eq!(prediction.id, "p1");
        assert_eq!(prediction.status, PredictionStatus::Processing);
        assert!(prediction.output.is_none());
        assert!(!prediction.status.is_terminal());
    }

    #[test]
    fn deserializes_a_finished_job_with_output() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"id":"p2","status":"succeeded","output":["https://cdn.example/p2.png"]}"#,
        )
        .unwrap();
        assert!(prediction.status.is_terminal());
        assert_eq!(
            prediction.output.unwrap(),
            vec!["https://cdn.example/p2.png".to_string()]
        );
    }

    #[test]
    fn unknown_statuses_are_not_terminal() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"id":"p3","status":"canceled"}"#).unwrap();
        assert_eq!(prediction.status, PredictionStatus::Unknown);
        assert!(!prediction.status.is_terminal());
    }

    #[test]
    fn request_serializes_the_wire_shape() {
        let request = PredictionRequest {
            version: "fofr/chibi-character:latest".into(),
            input: PredictionInput {
                image: "data:image/png;base64,AAAA".into(),
                style: "full body chibi character".into(),
                negative_prompt: "blurry".into(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["version"], "fofr/chibi-character:latest");
        assert_eq!(json["input"]["image"], "data:image/png;base64,AAAA");
        assert_eq!(json["input"]["negative_prompt"], "blurry");
    }
}
