pub mod user;

pub use user::User;

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.$prop
        }
    };
}

pub(self) use state_ref;
