use std::error::Error;

use rusoto_autoscaling::{DescribeAutoScalingGroupsError, UpdateAutoScalingGroupError};
use rusoto_core::RusotoError;
use rusoto_ec2::{DescribeInstancesError, StartInstancesError, StopInstancesError};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum ControlResourceError {
    NoneValue,
    UnsupportedResourceKind(String),
    Serialization(String),
    DescribeInstancesError(RusotoError<DescribeInstancesError>),
    StartInstancesError(RusotoError<StartInstancesError>),
    StopInstancesError(RusotoError<StopInstancesError>),
    DescribeAutoScalingGroupsError(RusotoError<DescribeAutoScalingGroupsError>),
    UpdateAutoScalingGroupError(RusotoError<UpdateAutoScalingGroupError>),
}

impl Display for ControlResourceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            ControlResourceError::NoneValue => write!(f, "Value is None"),
            ControlResourceError::UnsupportedResourceKind(ref name) => {
                write!(f, "Unsupported aws service: {}", name)
            }
            ControlResourceError::Serialization(ref message) => {
                write!(f, "Failed to serialize response body: {}", message)
            }
            ControlResourceError::DescribeInstancesError(ref error) => Display::fmt(error, f),
            ControlResourceError::StartInstancesError(ref error) => Display::fmt(error, f),
            ControlResourceError::StopInstancesError(ref error) => Display::fmt(error, f),
            ControlResourceError::DescribeAutoScalingGroupsError(ref error) => {
                Display::fmt(error, f)
            }
            ControlResourceError::UpdateAutoScalingGroupError(ref error) => Display::fmt(error, f),
        }
    }
}

impl Error for ControlResourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ControlResourceError::DescribeInstancesError(ref error) => Some(error),
            ControlResourceError::StartInstancesError(ref error) => Some(error),
            ControlResourceError::StopInstancesError(ref error) => Some(error),
            ControlResourceError::DescribeAutoScalingGroupsError(ref error) => Some(error),
            ControlResourceError::UpdateAutoScalingGroupError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<DescribeInstancesError>> for ControlResourceError {
    fn from(e: RusotoError<DescribeInstancesError>) -> ControlResourceError {
        ControlResourceError::DescribeInstancesError(e)
    }
}

impl From<RusotoError<StartInstancesError>> for ControlResourceError {
    fn from(e: RusotoError<StartInstancesError>) -> ControlResourceError {
        ControlResourceError::StartInstancesError(e)
    }
}

impl From<RusotoError<StopInstancesError>> for ControlResourceError {
    fn from(e: RusotoError<StopInstancesError>) -> ControlResourceError {
        ControlResourceError::StopInstancesError(e)
    }
}

impl From<RusotoError<DescribeAutoScalingGroupsError>> for ControlResourceError {
    fn from(e: RusotoError<DescribeAutoScalingGroupsError>) -> ControlResourceError {
        ControlResourceError::DescribeAutoScalingGroupsError(e)
    }
}

impl From<RusotoError<UpdateAutoScalingGroupError>> for ControlResourceError {
    fn from(e: RusotoError<UpdateAutoScalingGroupError>) -> ControlResourceError {
        ControlResourceError::UpdateAutoScalingGroupError(e)
    }
}

impl From<serde_json::Error> for ControlResourceError {
    fn from(e: serde_json::Error) -> ControlResourceError {
        ControlResourceError::Serialization(e.to_string())
    }
}
