use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CreateSetoran {
    pub(super) employee_name: String,
    #[serde(default, rename = "employeeId")]
    pub(super) employee_id: Option<Uuid>,
    pub(super) jam_masuk: String,
    pub(super) jam_keluar: String,
    #[serde(deserialize_with = "normalize::de_quantity")]
    pub(super) nomor_awal: f64,
    #[serde(deserialize_with = "normalize::de_quantity")]
    pub(super) nomor_akhir: f64,
    #[serde(default, deserialize_with = "normalize::de_quantity")]
    pub(super) qris_setoran: f64,
    #[serde(default)]
    pub(super) expenses: Vec<LineItem>,
    #[serde(default)]
    pub(super) income: Vec<LineItem>,
}

/// `201` body. The derived members only show up when their posting branch
/// went through; the setoran itself is always there.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CreateSetoranResponse {
    pub(super) setoran: setoran::Model,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) attendance: Option<attendance::Model>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) sales: Option<sales::Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(super) cashflow: Vec<cashflow::Model>,
}
