use std::any::type_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("addition overflow: {a} + {b} > {ty}::MAX")]
    OverflowAdd {
        ty: &'static str,
        a: String,
        b: String,
    },

    #[error("subtraction overflow: {a} - {b} < {ty}::MIN")]
    OverflowSub {
        ty: &'static str,
        a: String,
        b: String,
    },

    #[error("multiplication overflow: {a} * {b} > {ty}::MAX")]
    OverflowMul {
        ty: &'static str,
        a: String,
        b: String,
    },

    #[error("power overflow: {a} ^ {b} > {ty}::MAX")]
    OverflowPow {
        ty: &'static str,
        a: String,
        b: u32,
    },

    #[error("conversion overflow: {source_type}({value}) > {target_type}::MAX")]
    OverflowConversion {
        source_type: &'static str,
        target_type: &'static str,
        value: String,
    },

    #[error("division by zero: {a} / 0")]
    DivisionByZero { a: String },

    #[error("failed to parse `{input}` into {ty}: {reason}")]
    ParseNumber {
        ty: &'static str,
        input: String,
        reason: String,
    },
}

impl MathError {
    pub fn overflow_add<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowAdd {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_sub<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowSub {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_mul<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowMul {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_pow<T>(a: T, b: u32) -> Self
    where
        T: ToString,
    {
        Self::OverflowPow {
            ty: type_name::<T>(),
            a: a.to_string(),
            b,
        }
    }

    pub fn overflow_conversion<A, B>(value: A) -> Self
    where
        A: ToString,
    {
        Self::OverflowConversion {
            source_type: type_name::<A>(),
            target_type: type_name::<B>(),
            value: value.to_string(),
        }
    }

    pub fn division_by_zero<T>(a: T) -> Self
    where
        T: ToString,
    {
        Self::DivisionByZero { a: a.to_string() }
    }

    pub fn parse_number<T, I, R>(input: I, reason: R) -> Self
    where
        I: ToString,
        R: ToString,
    {
        Self::ParseNumber {
            ty: type_name::<T>(),
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
