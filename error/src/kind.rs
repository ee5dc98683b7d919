use derive_more::Display;

macro_rules! def_error_kinds {
    (
        $(
            $(#[$attr:meta])*
            $kind:ident = $code:literal, $retriable:literal, $message:literal;
        )+
    ) => {
        /// A list specifying categories of Rosetta errors.
        ///
        /// The numeric code, message and retriable flag of each kind are fixed: clients match on
        /// them.
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
        pub enum ErrorKind {
            $(
                $(#[$attr])*
                $kind = $code,
            )+
        }

        impl ErrorKind {
            /// All the error kinds, ordered by code.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$kind,)+];

            /// The stable numeric code.
            pub fn code(self) -> i32 {
                self as i32
            }

            /// Whether the caller may retry the same request.
            pub fn retriable(self) -> bool {
                match self {
                    $(ErrorKind::$kind => $retriable,)+
                }
            }

            /// The human readable message.
            pub fn message(self) -> &'static str {
                match self {
                    $(ErrorKind::$kind => $message,)+
                }
            }
        }
    };
}

def_error_kinds! {
    /// Calling the CKB node failed.
    RpcError = 1, true, "RPC error.";
    /// The address is not a valid CKB address.
    AddressParseError = 2, false, "Address parse error.";
    /// The node rejected or could not accept the transaction.
    SubmitError = 3, true, "Submit transaction error.";
    /// Unexpected server side failure.
    ServerError = 4, true, "Server error.";
    UnsupportedCurveType = 5, false, "Unsupported curve type.";
    InvalidPublicKey = 6, false, "Invalid public key.";
    MissingInputOperations = 7, false, "Must have INPUT type operations.";
    MissingOutputOperations = 8, false, "Must have OUTPUT type operations.";
    UnsupportedOperationType = 9, false, "Unsupported operation type.";
    InvalidInputAmount = 10, false, "Input operation amount value must be negative.";
    InvalidCoinChange = 11, false, "Invalid coin change.";
    InvalidOutputAmount = 12, false, "Output operation amount value must not be negative.";
    /// Inputs locked by anything but the single signature lock.
    UnsupportedLockType = 13, false, "Unsupported lock type.";
    LessThanMinCapacity = 14, false, "Output capacity is less than the minimum capacity.";
    CapacityNotEnough = 15, false, "Capacity not enough.";
    InvalidOperationMetadata = 16, false, "Invalid operation metadata.";
    InvalidCellDep = 17, false, "Invalid cell dep.";
    InvalidTypeScript = 18, false, "Invalid type script.";
    InvalidOutputData = 19, false, "Invalid output data.";
    InvalidAccountIdentifierMetadata = 20, false, "Invalid account identifier metadata.";
    MissingOption = 21, false, "Must set options in ConstructionMetadataRequest.";
    InvalidPreprocessOptions = 22, false, "Invalid preprocess options.";
    InvalidConstructionMetadata = 23, false, "Invalid construction metadata.";
    UnsupportedConstructionType = 24, false, "Unsupported construction type.";
    /// The signing digest could not be computed from the assembled transaction.
    SignMessagesBuildError = 25, false, "Signing messages build error.";
    /// Signatures do not match the witness placeholders.
    SignedTxBuildError = 26, false, "Signed transaction build error.";
    TransactionParseError = 27, false, "Transaction parse error.";
    AddressGenerationError = 28, false, "Address generation error.";
    UnsupportedNetwork = 29, false, "Unsupported network.";
    SudtAmountInvalid = 30, false, "sUDT amount invalid.";
    UnsignedTxBuildError = 31, false, "Unsigned transaction build error.";
    ComputeHashError = 32, false, "Compute hash error.";
    /// The request body is not a well-formed request of the endpoint.
    DataParseError = 33, false, "Data parse error.";
}
