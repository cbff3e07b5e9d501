#[macro_export]
macro_rules! type_code_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Binary, Binary, label = "Binary", is_numeric = false, is_integral = false, is_signed = false),
            (Boolean, Boolean, label = "Boolean", is_numeric = false, is_integral = false, is_signed = false),
            (Byte, UInteger, label = "Byte", is_numeric = true, is_integral = true, is_signed = false),
            (DateTime, DateTime, label = "DateTime", is_numeric = false, is_integral = false, is_signed = false),
            (Decimal, Decimal, label = "Decimal", is_numeric = true, is_integral = false, is_signed = true),
            (Double, Double, label = "Double", is_numeric = true, is_integral = false, is_signed = true),
            (Int16, Integer, label = "Int16", is_numeric = true, is_integral = true, is_signed = true),
            (Int32, Integer, label = "Int32", is_numeric = true, is_integral = true, is_signed = true),
            (Int64, Integer, label = "Int64", is_numeric = true, is_integral = true, is_signed = true),
            (Object, Object, label = "Object", is_numeric = false, is_integral = false, is_signed = false),
            (SByte, Integer, label = "SByte", is_numeric = true, is_integral = true, is_signed = true),
            (Single, Double, label = "Single", is_numeric = true, is_integral = false, is_signed = true),
            (String, String, label = "String", is_numeric = false, is_integral = false, is_signed = false),
            (UInt16, UInteger, label = "UInt16", is_numeric = true, is_integral = true, is_signed = false),
            (UInt32, UInteger, label = "UInt32", is_numeric = true, is_integral = true, is_signed = false),
            (UInt64, UInteger, label = "UInt64", is_numeric = true, is_integral = true, is_signed = false),
        }
    };
}

#[macro_export]
macro_rules! type_code_registry {
    ($macro:ident) => {
        $crate::type_code_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::type_code_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $code:expr; @entries $( ($variant:ident, $family:ident, label = $label:expr, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_signed = $is_signed:expr) ),* $(,)? ) => {
        match $code {
            $(
                $crate::TypeCode::$variant => $crate::TypeMetadata {
                    family: $crate::ValueFamily::$family,
                    label: $label,
                    is_numeric: $is_numeric,
                    is_integral: $is_integral,
                    is_signed: $is_signed,
                },
            )*
        }
    };
}

macro_rules! all_codes_from_registry {
    ( @entries $( ($variant:ident, $family:ident, label = $label:expr, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_signed = $is_signed:expr) ),* $(,)? ) => {
        [ $( $crate::TypeCode::$variant ),* ]
    };
}
