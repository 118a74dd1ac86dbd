use crate::mol::IndexRemap;

/// Bond payloads that store atom indices of their own.
///
/// [`Mol`](crate::Mol) calls this on every surviving bond after a removal so
/// that stored references follow the renumbering.
pub trait RemapAtoms {
    fn remap_atoms(&mut self, remap: &IndexRemap);
}
