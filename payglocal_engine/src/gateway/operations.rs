use std::{fmt::Display, str::FromStr};

use crate::{gateway::GatewayError, helpers::ValidationRules};

const PAYMENT_INITIATE_PATH: &str = "/gl/v1/payments/initiate/paycollect";
const REFUND_PATH: &str = "/gl/v1/payments/{gid}/refund";
const CAPTURE_PATH: &str = "/gl/v1/payments/{gid}/capture";
const AUTH_REVERSAL_PATH: &str = "/gl/v1/payments/{gid}/auth-reversal";
const STATUS_PATH: &str = "/gl/v1/payments/{gid}/status";
const SI_PAUSE_PATH: &str = "/gl/v1/payments/si/pause";
const SI_ACTIVATE_PATH: &str = "/gl/v1/payments/si/activate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// The gateway calls a merchant backend makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOperation {
    /// One-off payment initiation.
    JwtPayment,
    /// Payment that also registers a standing instruction (recurring mandate).
    SiPayment,
    /// Authorisation only; funds are captured later.
    AuthPayment,
    Refund,
    Capture,
    AuthReversal,
    Status,
    PauseSi,
    ActivateSi,
}

impl GatewayOperation {
    pub const ALL: [GatewayOperation; 9] = [
        Self::JwtPayment,
        Self::SiPayment,
        Self::AuthPayment,
        Self::Refund,
        Self::Capture,
        Self::AuthReversal,
        Self::Status,
        Self::PauseSi,
        Self::ActivateSi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::JwtPayment => "jwt",
            Self::SiPayment => "si",
            Self::AuthPayment => "auth",
            Self::Refund => "refund",
            Self::Capture => "capture",
            Self::AuthReversal => "authreversal",
            Self::Status => "status",
            Self::PauseSi => "pause",
            Self::ActivateSi => "activate",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Status => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    fn path_template(&self) -> &'static str {
        match self {
            Self::JwtPayment | Self::SiPayment | Self::AuthPayment => PAYMENT_INITIATE_PATH,
            Self::Refund => REFUND_PATH,
            Self::Capture => CAPTURE_PATH,
            Self::AuthReversal => AUTH_REVERSAL_PATH,
            Self::Status => STATUS_PATH,
            Self::PauseSi => SI_PAUSE_PATH,
            Self::ActivateSi => SI_ACTIVATE_PATH,
        }
    }

    pub fn requires_gid(&self) -> bool {
        self.path_template().contains("{gid}")
    }

    /// Read calls have no body, so their digest token covers the request path instead of an encrypted token.
    pub fn signs_path(&self) -> bool {
        self.method() == HttpMethod::Get
    }

    /// The API path for this operation. `gid` is substituted into paths that need one and ignored otherwise.
    pub fn path(&self, gid: Option<&str>) -> Result<String, GatewayError> {
        let template = self.path_template();
        if !self.requires_gid() {
            return Ok(template.to_string());
        }
        match gid.map(str::trim) {
            Some(gid) if gid.is_empty() => Err(GatewayError::MissingGid(self.name().to_string())),
            Some(gid) if is_valid_gid(gid) => Ok(template.replace("{gid}", gid)),
            Some(gid) => Err(GatewayError::InvalidGid(format!("{gid:?} may only contain letters, digits, '-' and '_'"))),
            None => Err(GatewayError::MissingGid(self.name().to_string())),
        }
    }

    pub fn validation_rules(&self) -> ValidationRules {
        const PAYMENT_FIELDS: [&str; 3] = ["merchantTxnId", "paymentData", "merchantCallbackURL"];
        match self {
            Self::JwtPayment | Self::AuthPayment => ValidationRules::new().require(&PAYMENT_FIELDS),
            Self::SiPayment => ValidationRules::new().require(&PAYMENT_FIELDS).require(&["standingInstruction"]),
            Self::Refund => ValidationRules::new()
                .require(&["gid"])
                .with_operation_type("refundType", &["F", "P"])
                .with_conditional("refundType", "P", &["paymentData.totalAmount"]),
            Self::Capture => ValidationRules::new()
                .require(&["gid", "merchantTxnId"])
                .with_operation_type("captureType", &["F", "P"])
                .with_conditional("captureType", "P", &["paymentData.totalAmount"]),
            Self::AuthReversal | Self::Status => ValidationRules::new().require(&["gid"]),
            Self::PauseSi | Self::ActivateSi => ValidationRules::new().require(&[
                "merchantTxnId",
                "standingInstruction.action",
                "standingInstruction.mandateId",
            ]),
        }
    }

    /// Pause and activate share a payload; the `standingInstruction.action` field decides which one it is.
    pub fn for_si_action(action: &str) -> Result<Self, GatewayError> {
        match action.to_ascii_lowercase().as_str() {
            "pause" | "pausebydate" => Ok(Self::PauseSi),
            "activate" => Ok(Self::ActivateSi),
            _ => Err(GatewayError::UnsupportedOperation(format!("standing instruction action {action}"))),
        }
    }
}

/// The gid becomes a path segment that is signed as-is, so it must survive URL parsing unchanged.
fn is_valid_gid(gid: &str) -> bool {
    gid.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl FromStr for GatewayOperation {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.name() == lower)
            .ok_or_else(|| GatewayError::UnsupportedOperation(s.to_string()))
    }
}

impl Display for GatewayOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(GatewayOperation::JwtPayment.path(None).unwrap(), "/gl/v1/payments/initiate/paycollect");
        assert_eq!(GatewayOperation::Status.path(Some("gl_o-9")).unwrap(), "/gl/v1/payments/gl_o-9/status");
        assert_eq!(GatewayOperation::Refund.path(Some(" gl_1 ")).unwrap(), "/gl/v1/payments/gl_1/refund");
        assert!(matches!(GatewayOperation::Capture.path(None), Err(GatewayError::MissingGid(_))));
        assert!(matches!(GatewayOperation::AuthReversal.path(Some("")), Err(GatewayError::MissingGid(_))));
    }

    #[test]
    fn gids_cannot_escape_their_path_segment() {
        for gid in ["gl 1", "../../si/pause?x=", "../si/pause?", "gl_1#frag", "gl/1", "gl%201", "gl\u{e9}"] {
            let err = GatewayOperation::Status.path(Some(gid)).unwrap_err();
            assert!(matches!(err, GatewayError::InvalidGid(_)), "{gid}: {err}");
            let err = GatewayOperation::Refund.path(Some(gid)).unwrap_err();
            assert!(matches!(err, GatewayError::InvalidGid(_)), "{gid}: {err}");
        }
    }

    #[test]
    fn only_status_is_a_read() {
        for op in GatewayOperation::ALL {
            assert_eq!(op.signs_path(), op == GatewayOperation::Status, "{op}");
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for op in GatewayOperation::ALL {
            assert_eq!(op.name().parse::<GatewayOperation>().unwrap(), op);
        }
        assert_eq!("AuthReversal".parse::<GatewayOperation>().unwrap(), GatewayOperation::AuthReversal);
        assert!("void".parse::<GatewayOperation>().is_err());
    }

    #[test]
    fn si_actions() {
        assert_eq!(GatewayOperation::for_si_action("PAUSEBYDATE").unwrap(), GatewayOperation::PauseSi);
        assert_eq!(GatewayOperation::for_si_action("activate").unwrap(), GatewayOperation::ActivateSi);
        assert!(GatewayOperation::for_si_action("cancel").is_err());
    }
}
