/// The byte order used for multi-byte scalars on the wire
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Values encoded in little endian representation
    #[default]
    Little,
    /// Values encoded in big endian representation
    Big,
}

impl Endian {
    /// The native endianness of the target platform
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }
}

/// How strictly scalar values must match the type their signature names
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// A scalar must already have exactly the type the signature names
    #[default]
    Strict,
    /// Integers are converted to any other integer type they fit into, and to doubles.
    ///
    /// An integer that does not fit is still a type mismatch.
    Weak,
}

/// Settings for checking values and for reading and writing wire data
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    endian: Endian,
    coercion: Coercion,
}

impl Context {
    /// A context using the specified byte order
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            coercion: Coercion::default(),
        }
    }

    /// A context using the byte order of the target platform
    pub fn native() -> Self {
        Self::new(Endian::native())
    }

    /// The byte order for multi-byte scalars
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Return a copy of this context with a different byte order
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// How values are matched against scalar types
    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    /// Return a copy of this context with a different coercion mode
    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(Context::default().endian(), Endian::Little);
        assert_eq!(Context::default().coercion(), Coercion::Strict);
        assert_eq!(
            Context::new(Endian::Big)
                .with_coercion(Coercion::Weak)
                .coercion(),
            Coercion::Weak
        );
        assert_eq!(
            Context::default().with_endian(Endian::Big),
            Context::new(Endian::Big)
        );

        if cfg!(target_endian = "little") {
            assert_eq!(Context::native().endian(), Endian::Little);
        } else {
            assert_eq!(Context::native().endian(), Endian::Big);
        }
    }
}
