//! Master dataset records and their translation into core vehicles.

use std::str::FromStr;

use induction_core::{Certificates, JobPriority, ParseLevelError, RiskLevel, Vehicle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a master record column holds an unknown level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record '{vehicle_id}' has an invalid {column}: {source}")]
pub struct RecordError {
    /// `TrainSet_ID` of the offending record.
    pub vehicle_id: String,
    /// Column name as it appears in the dataset.
    pub column: &'static str,
    /// Parse failure.
    #[source]
    pub source: ParseLevelError,
}

/// One row of the consolidated master dataset.
///
/// Field names follow the dataset columns. Columns not listed here are kept
/// verbatim in [`VehicleRecord::extra`] and written back out on serialise.
/// Missing job priorities and branding risks are `null`
/// for vehicles without an open job or a branding contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Vehicle identifier.
    #[serde(rename = "TrainSet_ID")]
    pub trainset_id: String,
    /// Rolling-stock certificate status.
    #[serde(rename = "Rolling-Stock_Status")]
    pub rolling_stock_status: String,
    /// Signalling certificate status.
    #[serde(rename = "Signalling_Status")]
    pub signalling_status: String,
    /// Telecom certificate status.
    #[serde(rename = "Telecom_Status")]
    pub telecom_status: String,
    /// Highest priority among open job cards, if any.
    #[serde(rename = "Highest_Open_Job_Priority", default)]
    pub highest_open_job_priority: Option<String>,
    /// Deep-clean compliance.
    #[serde(rename = "Compliance_Status")]
    pub compliance_status: String,
    /// Days since the last deep clean.
    #[serde(rename = "Days_Since_Last_Clean")]
    pub days_since_last_clean: u32,
    /// Mileage urgency.
    #[serde(rename = "Urgency_Level")]
    pub urgency_level: String,
    /// Branding SLA penalty risk, if the vehicle carries a contract.
    #[serde(rename = "Penalty_Risk_Level", default)]
    pub penalty_risk_level: Option<String>,
    /// Estimated shunting time to the departure position.
    #[serde(rename = "Estimated_Shunting_Time_Minutes")]
    pub estimated_shunting_time_minutes: u32,
    /// Columns the planner does not read, such as advertiser or odometer data.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VehicleRecord {
    /// Interpret the record as a core vehicle.
    ///
    /// # Examples
    /// ```
    /// use induction_data::VehicleRecord;
    ///
    /// let record: VehicleRecord = serde_json::from_str(r#"{
    ///     "TrainSet_ID": "TS-07",
    ///     "Rolling-Stock_Status": "Valid",
    ///     "Signalling_Status": "Expired",
    ///     "Telecom_Status": "Valid",
    ///     "Highest_Open_Job_Priority": null,
    ///     "Compliance_Status": "Due Soon",
    ///     "Days_Since_Last_Clean": 14,
    ///     "Urgency_Level": "Medium",
    ///     "Penalty_Risk_Level": "High",
    ///     "Estimated_Shunting_Time_Minutes": 6
    /// }"#)?;
    /// let vehicle = record.to_vehicle()?;
    /// assert!(vehicle.is_unsafe());
    /// assert_eq!(vehicle.shunting_minutes(), 6);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_vehicle(&self) -> Result<Vehicle, RecordError> {
        let certificates = Certificates {
            rolling_stock: self.parse("Rolling-Stock_Status", &self.rolling_stock_status)?,
            signalling: self.parse("Signalling_Status", &self.signalling_status)?,
            telecom: self.parse("Telecom_Status", &self.telecom_status)?,
        };
        let highest_open_job: Option<JobPriority> =
            match self.highest_open_job_priority.as_deref() {
                Some(text) if !is_blank(text) => {
                    Some(self.parse("Highest_Open_Job_Priority", text)?)
                }
                _ => None,
            };
        let branding_risk = match self.penalty_risk_level.as_deref() {
            Some(text) if !is_blank(text) => self.parse("Penalty_Risk_Level", text)?,
            _ => RiskLevel::Low,
        };
        let builder = Vehicle::builder(self.trainset_id.clone())
            .certificates(certificates)
            .highest_open_job(highest_open_job)
            .cleaning(
                self.parse("Compliance_Status", &self.compliance_status)?,
                self.days_since_last_clean,
            )
            .mileage_urgency(self.parse("Urgency_Level", &self.urgency_level)?)
            .branding_risk(branding_risk)
            .shunting_minutes(self.estimated_shunting_time_minutes);
        Ok(builder.build())
    }

    fn parse<T>(&self, column: &'static str, text: &str) -> Result<T, RecordError>
    where
        T: FromStr<Err = ParseLevelError>,
    {
        text.parse().map_err(|source| RecordError {
            vehicle_id: self.trainset_id.clone(),
            column,
            source,
        })
    }
}

/// Pandas exports an absent job as `"None"` or an empty cell.
fn is_blank(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use induction_core::{CertificateStatus, ComplianceStatus};
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> VehicleRecord {
        VehicleRecord {
            trainset_id: "TS-03".to_owned(),
            rolling_stock_status: "Valid".to_owned(),
            signalling_status: "Valid".to_owned(),
            telecom_status: "Expiring".to_owned(),
            highest_open_job_priority: Some("Critical".to_owned()),
            compliance_status: "Overdue".to_owned(),
            days_since_last_clean: 18,
            urgency_level: "High".to_owned(),
            penalty_risk_level: Some("Critical".to_owned()),
            estimated_shunting_time_minutes: 0,
            extra: serde_json::Map::new(),
        }
    }

    #[rstest]
    fn converts_every_column(record: VehicleRecord) {
        let vehicle = record.to_vehicle().unwrap();
        assert_eq!(vehicle.id().as_str(), "TS-03");
        assert_eq!(vehicle.certificates().telecom, CertificateStatus::Expiring);
        assert_eq!(vehicle.highest_open_job(), Some(JobPriority::Critical));
        assert_eq!(vehicle.cleaning().compliance, ComplianceStatus::Overdue);
        assert_eq!(vehicle.cleaning().days_overdue(), 3);
        assert_eq!(vehicle.mileage_urgency(), RiskLevel::High);
        assert_eq!(vehicle.branding_risk(), RiskLevel::Critical);
        assert!(vehicle.is_unsafe());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("None"))]
    fn absent_values_fall_back(mut record: VehicleRecord, #[case] text: Option<&str>) {
        record.highest_open_job_priority = text.map(str::to_owned);
        record.penalty_risk_level = text.map(str::to_owned);
        let vehicle = record.to_vehicle().unwrap();
        assert_eq!(vehicle.highest_open_job(), None);
        assert_eq!(vehicle.branding_risk(), RiskLevel::Low);
        assert!(!vehicle.is_unsafe());
    }

    #[rstest]
    fn unknown_levels_name_the_column(mut record: VehicleRecord) {
        record.urgency_level = "Severe".to_owned();
        let err = record.to_vehicle().unwrap_err();
        assert_eq!(err.column, "Urgency_Level");
        assert_eq!(err.vehicle_id, "TS-03");
        assert!(err.to_string().contains("Severe"));
    }

    #[rstest]
    fn unknown_columns_survive_a_rewrite() {
        let record: VehicleRecord = serde_json::from_str(
            r#"{
                "TrainSet_ID": "TS-01",
                "Rolling-Stock_Status": "Valid",
                "Signalling_Status": "Valid",
                "Telecom_Status": "Valid",
                "Compliance_Status": "Compliant",
                "Days_Since_Last_Clean": 2,
                "Urgency_Level": "Low",
                "Estimated_Shunting_Time_Minutes": 12,
                "Advertiser_Name": "Acme"
            }"#,
        )
        .unwrap();
        assert_eq!(record.highest_open_job_priority, None);
        assert_eq!(record.penalty_risk_level, None);
        assert_eq!(
            record.extra.get("Advertiser_Name"),
            Some(&serde_json::Value::from("Acme"))
        );
        assert!(record.to_vehicle().is_ok());

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["Advertiser_Name"], "Acme");
        assert_eq!(written["TrainSet_ID"], "TS-01");
    }
}
