//! `GET /lookup`: estimated annual cost of attendance for one college.
//!
//! ```text
//! GET /lookup?college=Test%20U                     → 200 {"Cost":"15000.00"}
//! GET /lookup?college=Test%20U&room_and_board=false → 200 {"Cost":"10000.00"}
//! GET /lookup?college=Nonexistent                  → 400 {"message":"Error: College not found"}
//! GET /lookup                                      → 400 {"message":"Error: College name is required"}
//! ```
//!
//! An unknown college is answered with 400, not 404. Clients depend on that.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::directory::{CollegeDirectory, MalformedField};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// Parsed `/lookup` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    /// `None` when the parameter is absent or empty.
    pub college: Option<String>,
    /// Whether room and board is added to tuition. Defaults to `true`.
    pub room_and_board: bool,
}

impl LookupQuery {
    pub fn from_request(req: &Request) -> Self {
        Self {
            college: req.query_param("college").filter(|c| !c.is_empty()),
            room_and_board: parse_flag(req.query_param("room_and_board").as_deref()),
        }
    }
}

/// Only an explicit `false` (any case) turns room and board off.
///
/// Absent, empty, `true`, or anything unrecognised keeps the default.
pub fn parse_flag(raw: Option<&str>) -> bool {
    !matches!(raw.map(str::trim), Some(v) if v.eq_ignore_ascii_case("false"))
}

/// Why a lookup did not produce a cost.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Error: College name is required")]
    MissingCollege,

    #[error("Error: College not found")]
    CollegeNotFound,

    #[error("Error: Cost data for this college is invalid")]
    MalformedRecord {
        college: String,
        #[source]
        field: MalformedField,
    },

    #[error("Error: Cost data for this college is invalid")]
    CostOutOfRange { college: String },
}

impl LookupError {
    pub fn status(&self) -> Status {
        match self {
            LookupError::MissingCollege | LookupError::CollegeNotFound => Status::BadRequest,
            LookupError::MalformedRecord { .. } | LookupError::CostOutOfRange { .. } => {
                Status::InternalServerError
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status();
        Json(ErrorBody { message: self.to_string() }).with_status(status)
    }
}

/// An annual cost, always rendered with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cost(f64);

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Serialize)]
struct CostBody {
    #[serde(rename = "Cost")]
    cost: Cost,
}

impl IntoResponse for Cost {
    fn into_response(self) -> Response {
        Json(CostBody { cost: self }).into_response()
    }
}

/// In-state tuition, plus room and board unless the query opts out.
pub fn estimate(directory: &CollegeDirectory, query: &LookupQuery) -> Result<Cost, LookupError> {
    let college = query.college.as_deref().ok_or(LookupError::MissingCollege)?;
    let record = directory.get(college).ok_or(LookupError::CollegeNotFound)?;

    let malformed = |field| LookupError::MalformedRecord { college: college.to_owned(), field };

    let mut cost = record.tuition_in().map_err(malformed)?;
    if query.room_and_board {
        cost += record.room_and_board().map_err(malformed)?;
    }
    // Each field is finite on its own, but the sum can still overflow.
    if !cost.is_finite() {
        return Err(LookupError::CostOutOfRange { college: college.to_owned() });
    }
    Ok(Cost(cost))
}

/// The HTTP handler for `GET /lookup`.
pub fn handle(directory: &CollegeDirectory, req: &Request) -> Result<Cost, LookupError> {
    info!("responding to college lookup request");
    let query = LookupQuery::from_request(req);
    debug!(
        college = query.college.as_deref().unwrap_or("<none>"),
        room_and_board = query.room_and_board,
        "parsed lookup query"
    );

    let result = estimate(directory, &query);
    match &result {
        Ok(cost) => info!(
            college = query.college.as_deref().unwrap_or_default(),
            %cost,
            "lookup succeeded"
        ),
        Err(LookupError::MissingCollege) => debug!("college name omitted"),
        Err(LookupError::CollegeNotFound) => {
            debug!(college = query.college.as_deref().unwrap_or_default(), "college not found")
        }
        Err(LookupError::MalformedRecord { college, field }) => {
            warn!(%college, error = %field, "dataset record has a non-numeric cost")
        }
        Err(LookupError::CostOutOfRange { college }) => {
            warn!(%college, "dataset costs overflow when summed")
        }
    }
    result
}

/// Builds the `/lookup` handler over a shared directory.
pub fn handler(
    directory: Arc<CollegeDirectory>,
) -> impl Fn(Request) -> std::future::Ready<Result<Cost, LookupError>> + Send + Sync + 'static {
    move |req: Request| std::future::ready(handle(&directory, &req))
}
